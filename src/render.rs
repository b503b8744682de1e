//! SVG rendering for language cards.
//!
//! The outer shell lives in `card.svg` and is filled in with `{{placeholder}}`
//! substitution; layout bodies are generated per card. Output is always an
//! SVG document, for error cards too.

use std::f64::consts::PI;

use crate::errors::CardError;
use crate::locale;
use crate::options::{CardOptions, Layout};
use crate::stats::{self, LanguageProfile, LanguageRecord};

/// Side padding shared by all layouts.
const PADDING: f64 = 25.0;
/// Vertical space reserved for the title row.
const TITLE_OFFSET: f64 = 55.0;
/// Vertical offset of the body when the title is hidden.
const NO_TITLE_OFFSET: f64 = 25.0;

/// Escapes text for embedding in SVG.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A language prepared for display: record plus its share of the card total.
struct DisplayLanguage<'a> {
    record: &'a LanguageRecord,
    percent: f64,
}

/// Ranks, filters and truncates the profile for display, computing each
/// language's percentage of the displayed total.
fn display_languages<'a>(
    profile: &'a LanguageProfile,
    options: &CardOptions,
) -> Vec<DisplayLanguage<'a>> {
    let records: Vec<&LanguageRecord> = stats::ranked(profile)
        .into_iter()
        .filter(|record| !options.hide.contains(&record.name.to_lowercase()))
        .take(options.langs_count)
        .collect();

    let total: u64 = records.iter().map(|record| record.size).sum();
    records
        .into_iter()
        .map(|record| DisplayLanguage {
            record,
            percent: if total == 0 {
                0.0
            } else {
                record.size as f64 / total as f64 * 100.0
            },
        })
        .collect()
}

/// Renders a language card for the given profile and options.
pub fn render_card(profile: &LanguageProfile, options: &CardOptions) -> String {
    let languages = display_languages(profile, options);
    let title = locale::card_title(&options.locale);

    let (width, height, body) = match options.layout {
        Layout::Normal => normal_body(&languages, options),
        Layout::Compact => compact_body(&languages, options),
        Layout::Donut => donut_body(&languages, options),
        Layout::DonutVertical => donut_vertical_body(&languages, options),
        Layout::Pie => pie_body(&languages, options),
    };

    shell(width, height, title, &body, options)
}

/// Renders an error card carrying the error's primary and secondary message.
pub fn render_error_card(error: &CardError, options: &CardOptions) -> String {
    let mut body = format!(
        concat!(
            r#"<text x="{x}" y="25" class="error-primary">{primary}</text>"#,
            "\n    ",
            r#"<text x="{x}" y="50" class="error-secondary">{secondary}</text>"#
        ),
        x = PADDING,
        primary = escape_xml(&error.to_string()),
        secondary = escape_xml(error.secondary_message()),
    );

    if options.show_repo_link && error.show_repo_link() {
        body.push_str(&format!(
            concat!(
                "\n    ",
                r##"<a href="{url}" target="_blank"><text x="{x}" y="75" class="repo-link" text-decoration="underline">{label}</text></a>"##
            ),
            url = env!("CARGO_PKG_REPOSITORY"),
            x = PADDING,
            label = "glot-cards/glot",
        ));
    }

    let mut options = options.clone();
    options.hide_title = true;
    shell(576.0, 120.0, "Error", &body, &options)
}

/// Fills the `card.svg` shell template.
fn shell(width: f64, height: f64, title: &str, body: &str, options: &CardOptions) -> String {
    let body_offset = if options.hide_title {
        NO_TITLE_OFFSET
    } else {
        TITLE_OFFSET
    };
    let title_element = if options.hide_title {
        String::new()
    } else {
        format!(
            r#"<text x="{}" y="35" class="title">{}</text>"#,
            PADDING,
            escape_xml(title)
        )
    };

    include_str!("../card.svg")
        .replace("{{width}}", &format_number(width))
        .replace("{{height}}", &format_number(height))
        .replace("{{rect_width}}", &format_number(width - 1.0))
        .replace("{{rect_height}}", &format_number(height - 1.0))
        .replace("{{bg_color}}", &options.bg_color)
        .replace("{{border_color}}", &options.border_color)
        .replace("{{title_color}}", &options.title_color)
        .replace("{{text_color}}", &options.text_color)
        .replace("{{accessible_title}}", &escape_xml(title))
        .replace("{{title}}", &title_element)
        .replace("{{body_offset}}", &format_number(body_offset))
        .replace("{{body}}", body)
}

/// Progress-bar rows: name and percentage above a filled bar.
fn normal_body(languages: &[DisplayLanguage], options: &CardOptions) -> (f64, f64, String) {
    let width = options.card_width.unwrap_or(300) as f64;
    let bar_width = width - 2.0 * PADDING;
    let row_height = 40.0;

    let rows: Vec<String> = languages
        .iter()
        .enumerate()
        .map(|(i, lang)| {
            let filled = bar_width * lang.percent / 100.0;
            format!(
                concat!(
                    r#"<g transform="translate({x}, {y})">"#,
                    r#"<text x="2" y="15" class="lang-name">{name}</text>"#,
                    r#"<text x="{right}" y="15" text-anchor="end" class="percent">{percent:.2}%</text>"#,
                    r##"<rect x="0" y="25" rx="5" width="{bar}" height="8" fill="#ddd"/>"##,
                    r#"<rect x="0" y="25" rx="5" width="{filled:.2}" height="8" fill="{color}"/>"#,
                    "</g>"
                ),
                x = PADDING,
                y = i as f64 * row_height,
                name = escape_xml(&lang.record.name),
                right = bar_width - 2.0,
                percent = lang.percent,
                bar = bar_width,
                filled = filled,
                color = lang.record.color,
            )
        })
        .collect();

    let body_offset = body_offset_for(options);
    let height = body_offset + languages.len() as f64 * row_height + 10.0;
    (width, height, rows.join("\n    "))
}

/// One stacked bar plus a two-column legend.
fn compact_body(languages: &[DisplayLanguage], options: &CardOptions) -> (f64, f64, String) {
    let width = options.card_width.unwrap_or(300) as f64;
    let bar_width = width - 2.0 * PADDING;

    let mut segments = String::new();
    let mut offset = 0.0;
    for lang in languages {
        let segment = bar_width * lang.percent / 100.0;
        segments.push_str(&format!(
            r#"<rect x="{:.2}" y="0" width="{:.2}" height="8" fill="{}"/>"#,
            offset, segment, lang.record.color,
        ));
        offset += segment;
    }
    let bar = format!(
        concat!(
            r#"<g transform="translate({x}, 0)">"#,
            r#"<mask id="stats-mask"><rect x="0" y="0" width="{bar}" height="8" rx="5" fill="white"/></mask>"#,
            r#"<g mask="url(#stats-mask)">{segments}</g>"#,
            "</g>"
        ),
        x = PADDING,
        bar = bar_width,
        segments = segments,
    );

    let column_width = bar_width / 2.0;
    let legend: Vec<String> = languages
        .iter()
        .enumerate()
        .map(|(i, lang)| {
            let column = i % 2;
            let row = i / 2;
            format!(
                concat!(
                    r#"<g transform="translate({x:.2}, {y})">"#,
                    r#"<circle cx="5" cy="6" r="5" fill="{color}"/>"#,
                    r#"<text x="15" y="10" class="lang-name">{name} {percent:.2}%</text>"#,
                    "</g>"
                ),
                x = PADDING + column as f64 * column_width,
                y = 25 + row * 20,
                color = lang.record.color,
                name = escape_xml(&lang.record.name),
                percent = lang.percent,
            )
        })
        .collect();

    let rows = languages.len().div_ceil(2);
    let body_offset = body_offset_for(options);
    let height = body_offset + 25.0 + rows as f64 * 20.0 + 10.0;
    (width, height, format!("{}\n    {}", bar, legend.join("\n    ")))
}

/// Ring segments drawn with `stroke-dasharray` on circles.
fn ring_segments(languages: &[DisplayLanguage], cx: f64, cy: f64, radius: f64) -> String {
    let circumference = 2.0 * PI * radius;
    let mut consumed = 0.0;
    languages
        .iter()
        .map(|lang| {
            let length = circumference * lang.percent / 100.0;
            let segment = format!(
                concat!(
                    r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="transparent" stroke="{color}" "#,
                    r#"stroke-width="12" stroke-dasharray="{len:.2} {circ:.2}" stroke-dashoffset="{offset:.2}" "#,
                    r#"transform="rotate(-90 {cx} {cy})"/>"#
                ),
                cx = cx,
                cy = cy,
                r = radius,
                color = lang.record.color,
                len = length,
                circ = circumference,
                offset = -consumed,
            );
            consumed += length;
            segment
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

/// Single-column legend with color dots.
fn legend_column(languages: &[DisplayLanguage], x: f64, row_height: u32) -> String {
    languages
        .iter()
        .enumerate()
        .map(|(i, lang)| {
            format!(
                concat!(
                    r#"<g transform="translate({x}, {y})">"#,
                    r#"<circle cx="5" cy="6" r="5" fill="{color}"/>"#,
                    r#"<text x="15" y="10" class="lang-name">{name} {percent:.2}%</text>"#,
                    "</g>"
                ),
                x = x,
                y = i as u32 * row_height,
                color = lang.record.color,
                name = escape_xml(&lang.record.name),
                percent = lang.percent,
            )
        })
        .collect::<Vec<_>>()
        .join("\n    ")
}

/// Legend on the left, ring chart on the right.
fn donut_body(languages: &[DisplayLanguage], options: &CardOptions) -> (f64, f64, String) {
    let width = options.card_width.unwrap_or(440) as f64;
    let radius = 50.0;
    let chart_height = 2.0 * (radius + 8.0);
    let legend_height = languages.len() as f64 * 25.0;

    let cx = width - PADDING - radius - 8.0;
    let cy = chart_height / 2.0;
    let body = format!(
        "{}\n    {}",
        legend_column(languages, PADDING, 25),
        ring_segments(languages, cx, cy, radius)
    );

    let body_offset = body_offset_for(options);
    let height = body_offset + legend_height.max(chart_height) + 10.0;
    (width, height, body)
}

/// Ring chart on top, legend below.
fn donut_vertical_body(languages: &[DisplayLanguage], options: &CardOptions) -> (f64, f64, String) {
    let width = options.card_width.unwrap_or(300) as f64;
    let radius = 40.0;
    let chart_height = 2.0 * (radius + 8.0);

    let legend = format!(
        r#"<g transform="translate(0, {})">{}</g>"#,
        format_number(chart_height + 15.0),
        legend_column(languages, PADDING, 20)
    );
    let body = format!(
        "{}\n    {}",
        ring_segments(languages, width / 2.0, chart_height / 2.0, radius),
        legend
    );

    let body_offset = body_offset_for(options);
    let height = body_offset + chart_height + 15.0 + languages.len() as f64 * 20.0 + 10.0;
    (width, height, body)
}

/// An SVG path for one pie slice spanning `[start, end]` turns of the circle.
fn pie_slice_path(cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> String {
    let to_point = |turns: f64| {
        let angle = turns * 2.0 * PI - PI / 2.0;
        (cx + radius * angle.cos(), cy + radius * angle.sin())
    };
    let (x0, y0) = to_point(start);
    let (x1, y1) = to_point(end);
    let large_arc = i32::from(end - start > 0.5);
    format!(
        "M {cx:.2} {cy:.2} L {x0:.2} {y0:.2} A {r:.2} {r:.2} 0 {large} 1 {x1:.2} {y1:.2} Z",
        cx = cx,
        cy = cy,
        x0 = x0,
        y0 = y0,
        r = radius,
        large = large_arc,
        x1 = x1,
        y1 = y1,
    )
}

/// Legend on the left, pie chart on the right.
fn pie_body(languages: &[DisplayLanguage], options: &CardOptions) -> (f64, f64, String) {
    let width = options.card_width.unwrap_or(440) as f64;
    let radius = 60.0;
    let chart_height = 2.0 * radius;
    let cx = width - PADDING - radius;
    let cy = chart_height / 2.0;

    let mut slices = Vec::new();
    let mut consumed = 0.0;
    for lang in languages {
        let share = lang.percent / 100.0;
        if share >= 1.0 {
            // A lone language is a full disc, not an arc
            slices.push(format!(
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                cx, cy, radius, lang.record.color
            ));
        } else if share > 0.0 {
            slices.push(format!(
                r#"<path d="{}" fill="{}"/>"#,
                pie_slice_path(cx, cy, radius, consumed, consumed + share),
                lang.record.color
            ));
        }
        consumed += share;
    }

    let legend_height = languages.len() as f64 * 25.0;
    let body = format!(
        "{}\n    {}",
        legend_column(languages, PADDING, 25),
        slices.join("\n    ")
    );

    let body_offset = body_offset_for(options);
    let height = body_offset + legend_height.max(chart_height) + 10.0;
    (width, height, body)
}

fn body_offset_for(options: &CardOptions) -> f64 {
    if options.hide_title {
        NO_TITLE_OFFSET
    } else {
        TITLE_OFFSET
    }
}

/// Formats a dimension without a trailing `.0` when integral.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
