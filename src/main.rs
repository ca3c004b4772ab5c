//! forge – command-line dashboard exporter.
//!
//! Usage:
//!   forge pdf      <input> [--output out.pdf] [--title "Sales"] [--date 01/02/2024]
//!   forge slides   <input> [--output out.deck.json] [--title "Sales"] [--no-wrappers]
//!                  [--scale 1.35] [--gap-y 0.2] [--slide-width 10] [--slide-height 7.5]
//!   forge snapshot <input.html> [--output out.json]
//!
//! `<input>` is an HTML file (laid out at `--width` px, default 1280) or a
//! DOM snapshot `.json` recorded by a browser collector. Without `--output`
//! the file is written next to the input, named after the title.

use std::{env, fs, path::Path, path::PathBuf, process};

use deck_forge::cancel::CancelToken;
use deck_forge::dom::Document;
use deck_forge::pipeline::{export_pdf, export_slides, prepare_html, PdfConfig, SlideConfig};
use deck_forge::raster::BoxPainter;
use deck_forge::slide_layout::SlideLayoutParams;
use deck_forge::snapshot::{load_snapshot, to_json};
use futures::executor::block_on;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Pdf,
    Slides,
    Snapshot,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: PathBuf,
    output: Option<PathBuf>,
    title: Option<String>,
    date: Option<String>,
    width: f32,
    wrappers: bool,
    start_image: Option<String>,
    middle_image: Option<String>,
    end_image: Option<String>,
    fallback_start_image: Option<String>,
    fallback_end_image: Option<String>,
    /// Slide layout overrides; `None` keeps the default.
    scale: Option<f32>,
    gap_y: Option<f32>,
    slide_width: Option<f32>,
    slide_height: Option<f32>,
}

fn main() {
    env_logger::init();

    let argv: Vec<String> = env::args().collect();
    let prog = argv.first().map(String::as_str).unwrap_or("forge");
    let args = match parse_args(&argv) {
        Ok(a) => a,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("Error: {msg}");
            }
            print_usage(prog);
            process::exit(if msg.is_empty() { 0 } else { 1 });
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// An empty error string means `--help` was requested.
fn parse_args(argv: &[String]) -> Result<Args, String> {
    let mut iter = argv.iter().skip(1);
    let command = match iter.next().map(String::as_str) {
        Some("pdf") => Command::Pdf,
        Some("slides") => Command::Slides,
        Some("snapshot") => Command::Snapshot,
        Some("--help" | "-h") | None => return Err(String::new()),
        Some(other) => return Err(format!("unknown command '{other}'")),
    };

    let mut input = None;
    let mut args = Args {
        command,
        input: PathBuf::new(),
        output: None,
        title: None,
        date: None,
        width: 1280.0,
        wrappers: true,
        start_image: None,
        middle_image: None,
        end_image: None,
        fallback_start_image: None,
        fallback_end_image: None,
        scale: None,
        gap_y: None,
        slide_width: None,
        slide_height: None,
    };

    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| format!("{flag} needs a value"))
        };
        match flag {
            "--output" | "-o" => args.output = Some(PathBuf::from(value(flag)?)),
            "--title" | "-t" => args.title = Some(value(flag)?),
            "--date" => args.date = Some(value(flag)?),
            "--width" => args.width = positive(flag, &value(flag)?)?,
            "--scale" => args.scale = Some(positive(flag, &value(flag)?)?),
            "--gap-y" => {
                let raw = value(flag)?;
                let gap: f32 = raw
                    .parse()
                    .map_err(|_| format!("invalid {flag} '{raw}'"))?;
                if !gap.is_finite() || gap < 0.0 {
                    return Err(format!("{flag} must not be negative"));
                }
                args.gap_y = Some(gap);
            }
            "--slide-width" => args.slide_width = Some(positive(flag, &value(flag)?)?),
            "--slide-height" => args.slide_height = Some(positive(flag, &value(flag)?)?),
            "--no-wrappers" => args.wrappers = false,
            "--start-image" => args.start_image = Some(value(flag)?),
            "--middle-image" => args.middle_image = Some(value(flag)?),
            "--end-image" => args.end_image = Some(value(flag)?),
            "--fallback-start-image" => args.fallback_start_image = Some(value(flag)?),
            "--fallback-end-image" => args.fallback_end_image = Some(value(flag)?),
            "--help" | "-h" => return Err(String::new()),
            other if other.starts_with('-') => return Err(format!("unknown flag '{other}'")),
            path => {
                if input.is_some() {
                    return Err(format!("unexpected argument '{path}'"));
                }
                input = Some(PathBuf::from(path));
            }
        }
    }

    args.input = input.ok_or_else(|| "no input file specified".to_string())?;
    Ok(args)
}

fn positive(flag: &str, raw: &str) -> Result<f32, String> {
    match raw.parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(format!("invalid {flag} '{raw}' (expected a positive number)")),
    }
}

impl Args {
    fn slide_layout(&self) -> SlideLayoutParams {
        let defaults = SlideLayoutParams::default();
        SlideLayoutParams {
            slide_width: self.slide_width.unwrap_or(defaults.slide_width),
            slide_height: self.slide_height.unwrap_or(defaults.slide_height),
            gap_y: self.gap_y.unwrap_or(defaults.gap_y),
            scale_factor: self.scale.unwrap_or(defaults.scale_factor),
            ..defaults
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let doc = load_input(&args.input, args.width)?;
    let root = doc.content_root();

    // Default title: stem of the input filename.
    let title = args.title.clone().unwrap_or_else(|| {
        args.input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Dashboard")
            .to_string()
    });
    let cancel = CancelToken::new();

    match args.command {
        Command::Pdf => {
            let config = PdfConfig {
                title: title.clone(),
                date: args.date.clone(),
                ..PdfConfig::default()
            };
            let out = block_on(export_pdf(&doc, root, &BoxPainter, &config, &cancel))
                .map_err(|e| e.to_string())?;
            let path = output_path(args, &title, "pdf");
            write_output(&path, &out.bytes)?;
            let pages = out.layout.pages.len();
            eprintln!(
                "Wrote '{}' ({} bytes, {} page{})",
                path.display(),
                out.bytes.len(),
                pages,
                if pages == 1 { "" } else { "s" }
            );
        }
        Command::Slides => {
            let config = SlideConfig {
                title: title.clone(),
                start_end: args.wrappers,
                date: args.date.clone(),
                start_image: args.start_image.clone(),
                middle_image: args.middle_image.clone(),
                end_image: args.end_image.clone(),
                fallback_start_image: args.fallback_start_image.clone(),
                fallback_end_image: args.fallback_end_image.clone(),
                layout: args.slide_layout(),
                ..SlideConfig::default()
            };
            let deck = block_on(export_slides(&doc, root, &BoxPainter, &config, &cancel))
                .map_err(|e| e.to_string())?;
            let json = deck.to_json()?;
            let path = output_path(args, &title, "deck.json");
            write_output(&path, json.as_bytes())?;
            eprintln!(
                "Wrote '{}' ({} slide{})",
                path.display(),
                deck.slides.len(),
                if deck.slides.len() == 1 { "" } else { "s" }
            );
        }
        Command::Snapshot => {
            let json = to_json(&doc).map_err(|e| e.to_string())?;
            let path = output_path(args, &title, "snapshot.json");
            write_output(&path, json.as_bytes())?;
            eprintln!("Wrote '{}' ({} nodes)", path.display(), doc.len());
        }
    }
    Ok(())
}

fn load_input(path: &Path, width: f32) -> Result<Document, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("reading '{}': {e}", path.display()))?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let doc = if is_json {
        load_snapshot(&text)
    } else {
        prepare_html(&text, width)
    };
    doc.map_err(|e| e.to_string())
}

/// `--output`, or `<input dir>/<title>.<ext>`.
fn output_path(args: &Args, title: &str, ext: &str) -> PathBuf {
    if let Some(p) = &args.output {
        return p.clone();
    }
    let name = format!("{}.{ext}", file_safe(title));
    match args.input.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

fn file_safe(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "Dashboard".to_string()
    } else {
        cleaned
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("creating output directory: {e}"))?;
        }
    }
    fs::write(path, bytes).map_err(|e| format!("writing '{}': {e}", path.display()))
}

fn print_usage(prog: &str) {
    eprintln!("forge – dashboard to PDF / slide deck exporter");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} pdf      <input> [--output out.pdf] [--title T] [--date D]");
    eprintln!("  {prog} slides   <input> [--output out.deck.json] [--title T] [--no-wrappers]");
    eprintln!("  {prog} snapshot <input.html> [--output out.json]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <input>          HTML file, or a DOM snapshot with a .json extension");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --output, -o     Output path (default: <title>.<ext> next to the input)");
    eprintln!("  --title, -t      Header / title slide text (default: input filename stem)");
    eprintln!("  --date           Date shown in the header or on the title slide");
    eprintln!("  --width          Viewport width for HTML input in px (default: 1280)");
    eprintln!("  --no-wrappers    Slides only: omit the title and closing slides");
    eprintln!("  --start-image    Slides only: title slide background (path or data URI)");
    eprintln!("  --middle-image   Slides only: content slide background");
    eprintln!("  --end-image      Slides only: closing slide background");
    eprintln!("  --fallback-start-image, --fallback-end-image");
    eprintln!("                   Slides only: tried when the start / end image fails to load");
    eprintln!("  --scale          Slides only: maximum panel scale (default: 1.35)");
    eprintln!("  --gap-y          Slides only: extra gap between two panels in inches (default: 0)");
    eprintln!("  --slide-width    Slides only: slide width in inches (default: 13.333)");
    eprintln!("  --slide-height   Slides only: slide height in inches (default: 7.5)");
    eprintln!("  --help           Print this message");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("forge")
            .chain(args.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn slide_layout_flags() {
        let args = parse_args(&argv(&[
            "slides",
            "board.html",
            "--scale",
            "2",
            "--gap-y",
            "0.25",
            "--slide-width",
            "10",
            "--slide-height",
            "5.625",
            "--fallback-start-image",
            "start.png",
            "--fallback-end-image",
            "end.png",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Slides);
        assert_eq!(args.input, PathBuf::from("board.html"));
        assert_eq!(args.fallback_start_image.as_deref(), Some("start.png"));
        assert_eq!(args.fallback_end_image.as_deref(), Some("end.png"));

        let layout = args.slide_layout();
        assert_eq!(layout.scale_factor, 2.0);
        assert_eq!(layout.gap_y, 0.25);
        assert_eq!(layout.slide_width, 10.0);
        assert_eq!(layout.slide_height, 5.625);
        assert_eq!(layout.margin, SlideLayoutParams::default().margin);
    }

    #[test]
    fn layout_defaults_without_flags() {
        let args = parse_args(&argv(&["slides", "board.html"])).unwrap();
        assert_eq!(args.slide_layout(), SlideLayoutParams::default());
        assert_eq!(args.width, 1280.0);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let cases: [&[&str]; 4] = [
            &["slides", "b.html", "--scale", "0"],
            &["slides", "b.html", "--slide-width", "wide"],
            &["slides", "b.html", "--gap-y", "-1"],
            &["pdf", "b.html", "--width"],
        ];
        for bad in cases {
            let err = parse_args(&argv(bad)).unwrap_err();
            assert!(!err.is_empty(), "{bad:?}");
        }
    }

    #[test]
    fn help_is_an_empty_error() {
        assert_eq!(parse_args(&argv(&["--help"])).unwrap_err(), "");
        assert_eq!(parse_args(&argv(&["pdf", "-h"])).unwrap_err(), "");
    }
}
