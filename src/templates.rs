//! Sample dashboards for the CLI demo and the tests.
//!
//! Each template exercises a different part of the export: panels with
//! styled children, chart descriptors, export markers and tall content.

/// KPI cards, a bar chart, a table panel and a no-print toolbar.
pub fn sales_dashboard() -> &'static str {
    r##"
<div class="p-6 bg-gray-100" style="width: 1200px">
    <div class="flex justify-between items-center mb-4">
        <h1 class="text-3xl font-bold text-gray-900">Sales Overview</h1>
        <div class="pdfppt-noprint flex">
            <button class="px-4 py-2 bg-blue-500 text-white rounded">Export</button>
        </div>
    </div>

    <div class="grid grid-cols-3 gap-4 mb-4">
        <div class="bg-white border rounded-lg p-4">
            <p class="text-sm text-gray-500">Revenue</p>
            <p class="text-2xl font-bold">$1,204,000</p>
        </div>
        <div class="bg-white border rounded-lg p-4">
            <p class="text-sm text-gray-500">Orders</p>
            <p class="text-2xl font-bold">8,412</p>
        </div>
        <div class="bg-white border rounded-lg p-4">
            <p class="text-sm text-gray-500">Conversion</p>
            <p class="text-2xl font-bold">3.2%</p>
        </div>
    </div>

    <div class="bg-white border rounded-lg p-4 mb-4">
        <h2 class="text-xl font-semibold mb-2">Monthly revenue</h2>
        <div class="pdfppt-chart-snapshot h-64"
             pdfppt-data-chart='{"chartType":"bar","labels":["Jan","Feb","Mar","Apr"],"values":[120,150,170,90],"showLegend":false,"showValue":true}'>
            <div class="bg-blue-500 h-48 w-24"></div>
        </div>
    </div>

    <div class="bg-white border rounded-lg p-4">
        <h2 class="text-xl font-semibold mb-2">Top regions</h2>
        <table class="w-full">
            <tr>
                <th class="text-left p-2">Region</th>
                <th class="text-left p-2">Revenue</th>
            </tr>
            <tr>
                <td class="p-2">North</td>
                <td class="p-2">$420,000</td>
            </tr>
            <tr>
                <td class="p-2">South</td>
                <td class="p-2">$310,000</td>
            </tr>
        </table>
    </div>
</div>
"##
}

/// One regular panel followed by a panel that takes a slide of its own.
pub fn full_slide_dashboard() -> &'static str {
    r##"
<div class="p-6" style="width: 1200px">
    <div class="bg-white border p-4 mb-4">
        <p class="font-bold">Summary</p>
        <p>All regions grew this quarter.</p>
    </div>
    <div class="bg-white border p-4 mb-4" data-ppt-full-slide="true">
        <p class="font-bold">Regional breakdown</p>
        <div class="h-64" data-chart='{"chartType":"multibar","multilineData":[{"name":"2023","labels":["N","S"],"values":[3,4]},{"name":"2024","labels":["N","S"],"values":[5,6]}]}'></div>
    </div>
    <div class="bg-white border p-4">
        <p class="font-bold">Notes</p>
        <p>Figures are preliminary.</p>
    </div>
</div>
"##
}

/// Many stacked sections, taller than one PDF page.
pub fn long_report() -> String {
    let mut html = String::from(r#"<div class="p-4" style="width: 900px">"#);
    for i in 1..=12 {
        html.push_str(&format!(
            r#"<div class="bg-white border p-4 mb-4" style="height: 260px"><h2 class="text-xl font-bold">Section {i}</h2><p>Details for section {i}.</p></div>"#
        ));
    }
    html.push_str("</div>");
    html
}

/// Plain text without any panel.
pub fn plain_dashboard() -> &'static str {
    r##"
<div class="p-4" style="width: 800px">
    <h1 class="text-2xl font-bold">Status</h1>
    <p>Everything is running.</p>
</div>
"##
}
