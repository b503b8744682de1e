use glot::errors::CardError;
use glot::options::{CardOptions, Layout};
use glot::render::{escape_xml, render_card, render_error_card};
use glot::stats::{self, LanguageEdge, Repository};

fn sample_profile() -> stats::LanguageProfile {
    stats::aggregate(&[Repository {
        name: "sample".to_string(),
        languages: vec![
            LanguageEdge {
                size: 250,
                name: "HTML".to_string(),
                color: Some("#e34c26".to_string()),
            },
            LanguageEdge {
                size: 200,
                name: "JavaScript".to_string(),
                color: Some("#f1e05a".to_string()),
            },
            LanguageEdge {
                size: 50,
                name: "Shell".to_string(),
                color: Some("#89e051".to_string()),
            },
        ],
    }])
}

#[test]
fn test_escape_xml() {
    assert_eq!(escape_xml("C<PL>&'\""), "C&lt;PL&gt;&amp;&apos;&quot;");
    assert_eq!(escape_xml("plain"), "plain");
}

#[test]
fn test_normal_layout_lists_languages_with_bars() {
    let svg = render_card(&sample_profile(), &CardOptions::default());

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("Most Used Languages"));
    assert!(svg.contains("HTML"));
    assert!(svg.contains("JavaScript"));
    assert!(svg.contains("Shell"));
    assert!(svg.contains("#e34c26"));
    assert!(svg.contains("50.00%"));
    // Progress bars are rects
    assert!(svg.contains("<rect"));
}

#[test]
fn test_compact_layout_uses_stacked_bar() {
    let options = CardOptions {
        layout: Layout::Compact,
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(svg.contains("mask"));
    assert!(svg.contains("HTML"));
    assert!(svg.contains("JavaScript"));
}

#[test]
fn test_donut_layout_draws_ring_segments() {
    let options = CardOptions {
        layout: Layout::Donut,
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(svg.contains("stroke-dasharray"));
    assert!(svg.contains("HTML"));
}

#[test]
fn test_donut_vertical_layout_draws_ring_segments() {
    let options = CardOptions {
        layout: Layout::DonutVertical,
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(svg.contains("stroke-dasharray"));
}

#[test]
fn test_pie_layout_draws_slices() {
    let options = CardOptions {
        layout: Layout::Pie,
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(svg.contains("<path"));
    assert!(svg.contains("HTML"));
}

#[test]
fn test_pie_layout_single_language_renders_full_disc() {
    let profile = stats::aggregate(&[Repository {
        name: "only".to_string(),
        languages: vec![LanguageEdge {
            size: 100,
            name: "Rust".to_string(),
            color: Some("#dea584".to_string()),
        }],
    }]);
    let options = CardOptions {
        layout: Layout::Pie,
        ..CardOptions::default()
    };

    let svg = render_card(&profile, &options);

    assert!(!svg.contains("<path"));
    assert!(svg.contains(r##"fill="#dea584""##));
}

#[test]
fn test_hide_title_removes_title_text() {
    let options = CardOptions {
        hide_title: true,
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(!svg.contains(r#"class="title""#));
}

#[test]
fn test_card_width_is_applied() {
    let options = CardOptions {
        card_width: Some(500),
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(svg.contains(r#"width="500""#));
}

#[test]
fn test_localized_title() {
    let options = CardOptions {
        locale: "de".to_string(),
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(svg.contains("Meist verwendete Sprachen"));
}

#[test]
fn test_hide_filters_languages_from_display() {
    let options = CardOptions {
        hide: vec!["javascript".to_string()],
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(!svg.contains("JavaScript"));
    assert!(svg.contains("HTML"));
    // Percentages are recomputed over the displayed set: 250 of 300
    assert!(svg.contains("83.33%"));
}

#[test]
fn test_langs_count_truncates_display() {
    let options = CardOptions {
        langs_count: 1,
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(svg.contains("HTML"));
    assert!(!svg.contains("JavaScript"));
    assert!(!svg.contains("Shell"));
}

#[test]
fn test_language_names_are_escaped() {
    let profile = stats::aggregate(&[Repository {
        name: "odd".to_string(),
        languages: vec![LanguageEdge {
            size: 10,
            name: "F<o>&o".to_string(),
            color: Some("#123456".to_string()),
        }],
    }]);

    let svg = render_card(&profile, &CardOptions::default());

    assert!(svg.contains("F&lt;o&gt;&amp;o"));
    assert!(!svg.contains("F<o>&o"));
}

#[test]
fn test_custom_theme_colors_are_injected() {
    let options = CardOptions {
        title_color: "#ff0000".to_string(),
        bg_color: "#000000".to_string(),
        border_color: "#111111".to_string(),
        ..CardOptions::default()
    };

    let svg = render_card(&sample_profile(), &options);

    assert!(svg.contains("#ff0000"));
    assert!(svg.contains(r##"fill="#000000""##));
    assert!(svg.contains(r##"stroke="#111111""##));
}

#[test]
fn test_empty_profile_renders_shell() {
    let svg = render_card(&stats::LanguageProfile::new(), &CardOptions::default());

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Most Used Languages"));
}

#[test]
fn test_error_card_shows_both_messages() {
    let svg = render_error_card(&CardError::InvalidLayout, &CardOptions::default());

    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Something went wrong"));
    assert!(svg.contains("Incorrect layout input"));
}

#[test]
fn test_error_card_shows_repo_link_by_default() {
    let svg = render_error_card(&CardError::InvalidLayout, &CardOptions::default());

    assert!(svg.contains("glot-cards/glot"));
}

#[test]
fn test_blacklisted_error_card_suppresses_repo_link() {
    let svg = render_error_card(&CardError::Blacklisted, &CardOptions::default());

    assert!(svg.contains("This username is blacklisted"));
    assert!(svg.contains("Please deploy your own instance"));
    assert!(!svg.contains("glot-cards/glot"));
}

#[test]
fn test_repo_link_can_be_disabled_via_options() {
    let options = CardOptions {
        show_repo_link: false,
        ..CardOptions::default()
    };

    let svg = render_error_card(&CardError::InvalidLayout, &options);

    assert!(!svg.contains("glot-cards/glot"));
}

#[test]
fn test_upstream_error_card_carries_message() {
    let error = CardError::Upstream {
        message: "Could not resolve to a User with the login of missing.".to_string(),
    };

    let svg = render_error_card(&error, &CardOptions::default());

    assert!(svg.contains("Could not resolve to a User"));
    assert!(svg.contains("Make sure the provided username is not an organization"));
}
