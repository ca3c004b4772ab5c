//! Chart descriptors – the JSON an author embeds in `data-chart` /
//! `pdfppt-data-chart` – and their mapping to native slide chart series.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Treat an explicit `null` like a missing key.
fn null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

/// One entry of the legacy `multilineData` / `barchartData` arrays.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeriesMeta {
    pub name: Value,
    #[serde(deserialize_with = "null_default")]
    pub labels: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub values: Vec<Value>,
}

/// A `datasets` entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DatasetMeta {
    pub label: Value,
    #[serde(deserialize_with = "null_default")]
    pub values: Vec<Value>,
    pub color: Option<String>,
}

/// The chart descriptor as authored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartMeta {
    pub chart_type: String,
    #[serde(deserialize_with = "null_default")]
    pub labels: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub values: Vec<Value>,
    #[serde(deserialize_with = "null_default")]
    pub colors: Vec<String>,
    pub legend_color: Option<String>,
    /// Data label color; the key is spelled `lableColor` in the wild.
    #[serde(alias = "labelColor")]
    pub lable_color: Option<String>,
    pub show_legend: Option<bool>,
    pub show_value: Option<bool>,
    #[serde(deserialize_with = "null_default")]
    pub datasets: Vec<DatasetMeta>,
    #[serde(alias = "barchartData", deserialize_with = "null_default")]
    pub multiline_data: Vec<SeriesMeta>,
    pub bar_dir: Option<String>,
    pub bar_grouping: Option<String>,
    pub bar_gap_width_pct: Option<f32>,
    pub bar_overlap_pct: Option<f32>,
    pub cat_axis_label_rotate: Option<f32>,
    pub val_axis_title: Option<String>,
    pub cat_axis_title: Option<String>,
    #[serde(deserialize_with = "null_default")]
    pub chart_colors: Vec<String>,
}

/// Parse a raw attribute value. Anything that is not a JSON object is
/// rejected.
pub fn parse_chart_meta(raw: &str) -> Result<ChartMeta, String> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('{') || !trimmed.ends_with('}') {
        return Err("chart descriptor is not a JSON object".into());
    }
    serde_json::from_str(trimmed).map_err(|e| format!("invalid chart descriptor: {e}"))
}

// ---------------------------------------------------------------------------
// Native chart model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: String,
    pub labels: Vec<String>,
    /// Values handed to the chart writer (placeholder 1s for all-zero data).
    pub values: Vec<f64>,
    /// The real values, for totals and data labels.
    pub display_values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub show_legend: bool,
    pub legend_pos: String,
    pub show_value: bool,
    pub data_label_font_size: f32,
    pub legend_font_size: f32,
    pub data_label_font_bold: bool,
    pub legend_color: String,
    pub data_label_color: String,
    pub data_label_position: String,
    pub bar_grouping: String,
    pub bar_gap_width_pct: f32,
    pub bar_overlap_pct: f32,
    pub line_smooth: bool,
    pub bar_dir: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_axis_label_rotate: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub val_axis_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cat_axis_title: Option<String>,
    pub chart_colors: Vec<String>,
}

/// A chart ready for a presentation writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeChart {
    /// `bar`, `line`, `pie`, `doughnut`, `area`, `scatter`, or an unknown
    /// type passed through.
    pub chart_type: String,
    pub series: Vec<ChartSeries>,
    pub options: ChartOptions,
}

/// JavaScript-style `Number(v)`: numbers as-is, numeric strings parsed,
/// `null`/`false`/`""` → 0, `true` → 1, anything else NaN.
fn js_number(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        _ => f64::NAN,
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

fn js_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Keep the real values for display and swap in 1s when nothing is
/// positive, so pie and bar writers still draw the series.
fn with_placeholder(name: String, labels: Vec<String>, values: Vec<f64>) -> ChartSeries {
    let has_positive = values.iter().any(|v| *v > 0.0);
    let rendered = if has_positive {
        values.clone()
    } else {
        vec![1.0; values.len()]
    };
    ChartSeries {
        name,
        labels,
        values: rendered,
        display_values: values,
    }
}

/// Sanitize multi-series input: default names, labels/values truncated to
/// the shorter length (empty series dropped), blank labels replaced, and
/// non-finite values zeroed.
pub fn normalize_series(series: &[SeriesMeta]) -> Vec<ChartSeries> {
    series
        .iter()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let name = match &raw.name {
                Value::String(s) if !s.trim().is_empty() => s.clone(),
                _ => format!("Series {}", idx + 1),
            };
            let len = raw.labels.len().min(raw.values.len());
            if len == 0 {
                return None;
            }
            let labels = raw.labels[..len]
                .iter()
                .enumerate()
                .map(|(i, l)| match l {
                    Value::String(s) if !s.trim().is_empty() => s.clone(),
                    _ => format!("Label {}", i + 1),
                })
                .collect();
            let values = raw.values[..len]
                .iter()
                .map(|v| finite_or_zero(js_number(v)))
                .collect();
            Some(with_placeholder(name, labels, values))
        })
        .collect()
}

/// Multi-series input from `multilineData`, falling back to `datasets`
/// sharing the top-level labels.
fn multi_series(meta: &ChartMeta) -> Vec<SeriesMeta> {
    if !meta.multiline_data.is_empty() {
        return meta.multiline_data.clone();
    }
    meta.datasets
        .iter()
        .map(|d| SeriesMeta {
            name: d.label.clone(),
            labels: meta.labels.clone(),
            values: d.values.clone(),
        })
        .collect()
}

fn dataset_colors(meta: &ChartMeta) -> Vec<String> {
    meta.datasets.iter().filter_map(|d| d.color.clone()).collect()
}

/// Map a descriptor to native series and writer options. `None` when there
/// is nothing to draw.
pub fn to_native_series(meta: &ChartMeta) -> Option<NativeChart> {
    let chart_type = meta.chart_type.trim().to_ascii_lowercase();
    let is_round = chart_type == "pie" || chart_type == "doughnut";

    let mut options = ChartOptions {
        show_legend: meta.show_legend.unwrap_or(false),
        legend_pos: "b".into(),
        show_value: meta.show_value.unwrap_or(false),
        data_label_font_size: 10.0,
        legend_font_size: 10.0,
        data_label_font_bold: true,
        legend_color: meta.legend_color.clone().unwrap_or_else(|| "#000000".into()),
        data_label_color: meta.lable_color.clone().unwrap_or_else(|| "#000000".into()),
        data_label_position: if is_round { "ctr" } else { "t" }.into(),
        bar_grouping: "clustered".into(),
        bar_gap_width_pct: 400.0,
        bar_overlap_pct: -15.0,
        line_smooth: true,
        bar_dir: meta.bar_dir.clone().unwrap_or_else(|| "col".into()),
        cat_axis_label_rotate: None,
        val_axis_title: meta.val_axis_title.clone(),
        cat_axis_title: meta.cat_axis_title.clone(),
        chart_colors: meta.colors.clone(),
    };

    let (native_type, series) = match chart_type.as_str() {
        "multibar" => {
            options.bar_grouping = meta
                .bar_grouping
                .clone()
                .unwrap_or_else(|| "clustered".into());
            options.cat_axis_label_rotate = Some(meta.cat_axis_label_rotate.unwrap_or(0.0));
            options.bar_gap_width_pct = meta.bar_gap_width_pct.unwrap_or(400.0);
            options.bar_overlap_pct = meta.bar_overlap_pct.unwrap_or(-15.0);
            if options.chart_colors.is_empty() {
                options.chart_colors = dataset_colors(meta);
            }
            ("bar".to_string(), normalize_series(&multi_series(meta)))
        }
        "multiline" => {
            options.chart_colors = if meta.chart_colors.is_empty() {
                dataset_colors(meta)
            } else {
                meta.chart_colors.clone()
            };
            ("line".to_string(), normalize_series(&multi_series(meta)))
        }
        "bar" if !meta.colors.is_empty() => {
            let series = meta
                .labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let v = meta.values.get(i).map(js_number).unwrap_or(0.0);
                    with_placeholder(js_string(label), vec![String::new()], vec![finite_or_zero(v)])
                })
                .collect();
            ("bar".to_string(), series)
        }
        other => {
            let len = meta.labels.len().min(meta.values.len());
            let series = if len == 0 {
                Vec::new()
            } else {
                let labels = meta.labels[..len].iter().map(js_string).collect();
                let values = meta.values[..len]
                    .iter()
                    .map(|v| finite_or_zero(js_number(v)))
                    .collect();
                vec![with_placeholder("Chart".into(), labels, values)]
            };
            (other.to_string(), series)
        }
    };

    if series.is_empty() {
        log::warn!("Chart {:?} has no drawable series; skipping", meta.chart_type);
        return None;
    }

    Some(NativeChart {
        chart_type: native_type,
        series,
        options,
    })
}

/// Parse and map in one step, logging and skipping malformed descriptors.
pub fn interpret(raw: &str) -> Option<NativeChart> {
    match parse_chart_meta(raw) {
        Ok(meta) => to_native_series(&meta),
        Err(e) => {
            log::warn!("Skipping chart: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn native(raw: &str) -> NativeChart {
        interpret(raw).unwrap()
    }

    #[test]
    fn zero_bar_with_colors_gets_placeholders() {
        let chart = native(
            r##"{"chartType":"bar","labels":["A","B"],"values":[0,0],"colors":["#fff","#000"]}"##,
        );
        assert_eq!(chart.chart_type, "bar");
        assert_eq!(chart.series.len(), 2);
        for (s, name) in chart.series.iter().zip(["A", "B"]) {
            assert_eq!(s.name, name);
            assert_eq!(s.labels, vec![String::new()]);
            assert_eq!(s.values, vec![1.0]);
            assert_eq!(s.display_values, vec![0.0]);
        }
        assert_eq!(chart.options.chart_colors, vec!["#fff", "#000"]);
    }

    #[test]
    fn single_series_keeps_real_values() {
        let chart = native(r#"{"chartType":"pie","labels":["x","y"],"values":[3,"4"]}"#);
        assert_eq!(chart.series[0].name, "Chart");
        assert_eq!(chart.series[0].values, vec![3.0, 4.0]);
        assert_eq!(chart.series[0].display_values, vec![3.0, 4.0]);
        assert_eq!(chart.options.data_label_position, "ctr");
        assert_eq!(chart.options.data_label_color, "#000000");
    }

    #[test]
    fn multiline_normalizes_series() {
        let chart = native(
            r##"{"chartType":"multiline","chartColors":["#111111"],
                "multilineData":[
                    {"name":"", "labels":["Jan","", "Mar"], "values":[1,"x",3,4]},
                    {"name":"Empty", "labels":[], "values":[1]},
                    {"name":"Zero", "labels":["a","b"], "values":[0,0]}
                ]}"##,
        );
        assert_eq!(chart.chart_type, "line");
        assert_eq!(chart.series.len(), 2);
        let first = &chart.series[0];
        assert_eq!(first.name, "Series 1");
        assert_eq!(first.labels, vec!["Jan", "Label 2", "Mar"]);
        assert_eq!(first.values, vec![1.0, 0.0, 3.0]);
        let zero = &chart.series[1];
        assert_eq!(zero.name, "Zero");
        assert_eq!(zero.values, vec![1.0, 1.0]);
        assert_eq!(zero.display_values, vec![0.0, 0.0]);
        assert_eq!(chart.options.chart_colors, vec!["#111111"]);
        assert_eq!(chart.options.data_label_position, "t");
    }

    #[test]
    fn multibar_takes_tuning_and_legacy_key() {
        let chart = native(
            r##"{"chartType":"multibar","barGrouping":"stacked","barGapWidthPct":50,
                "lableColor":"#ffffff","showLegend":true,
                "barchartData":[{"name":"S","labels":["a"],"values":[2]}]}"##,
        );
        assert_eq!(chart.chart_type, "bar");
        assert_eq!(chart.options.bar_grouping, "stacked");
        assert_eq!(chart.options.bar_gap_width_pct, 50.0);
        assert_eq!(chart.options.bar_overlap_pct, -15.0);
        assert_eq!(chart.options.cat_axis_label_rotate, Some(0.0));
        assert_eq!(chart.options.data_label_color, "#ffffff");
        assert!(chart.options.show_legend);
    }

    #[test]
    fn datasets_feed_multi_series() {
        let chart = native(
            r##"{"chartType":"multibar","labels":["q1","q2"],
                "datasets":[{"label":"North","values":[1,2],"color":"#ff0000"}]}"##,
        );
        assert_eq!(chart.series[0].name, "North");
        assert_eq!(chart.series[0].labels, vec!["q1", "q2"]);
        assert_eq!(chart.options.chart_colors, vec!["#ff0000"]);
    }

    #[test]
    fn malformed_descriptors_are_skipped() {
        assert!(interpret("[1,2]").is_none());
        assert!(interpret("{not json}").is_none());
        assert!(interpret(r#"{"chartType":"pie"}"#).is_none());
        assert!(parse_chart_meta(r#"{"chartType":"bar","colors":null}"#).is_ok());
    }

    #[test]
    fn defaults_for_unknown_types() {
        let chart = native(r#"{"chartType":"radar","labels":["a"],"values":[5]}"#);
        assert_eq!(chart.chart_type, "radar");
        assert_eq!(chart.options.bar_dir, "col");
        assert_eq!(chart.options.legend_pos, "b");
    }
}
