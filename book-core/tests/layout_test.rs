use book_core::layout::{Primitive, TextRole};
use book_core::style::{self, palette, PageSize};
use book_core::{
    describe_document, layout_page, Document, EntryRecord, Field, LayoutConfig, PageDescriptor,
    TitleSize,
};
use pretty_assertions::assert_eq;

fn entry(code: &str) -> EntryRecord {
    EntryRecord {
        error_code: code.into(),
        category: "Client Error".into(),
        meaning: "Not Found".into(),
        details: "The requested resource could not be found on the server.".into(),
        fix: "Check the URL for typos.".into(),
    }
}

fn panel_rect(primitives: &[Primitive]) -> (f64, f64, f64, f64) {
    primitives
        .iter()
        .find_map(|p| match p {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                stroke: Some(_),
                ..
            } => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .expect("panel rect")
}

#[test]
fn describe_is_one_to_one_and_ordered() {
    let doc: Document = ["400", "404", "404", "500"].iter().map(|c| entry(c)).collect();
    let size = TitleSize::new(28).unwrap();
    let pages = describe_document(&doc, size);
    assert_eq!(pages.len(), 4);
    for (i, page) in pages.iter().enumerate() {
        assert_eq!(page.page_number, i + 1);
        assert_eq!(page.entry, doc.get(i).unwrap());
        assert_eq!(page.title_size, size);
    }
}

#[test]
fn describe_empty_document() {
    assert!(describe_document(&Document::empty(), TitleSize::default()).is_empty());
}

#[test]
fn page_structure() {
    let record = entry("404");
    let page = PageDescriptor {
        entry: &record,
        page_number: 7,
        title_size: TitleSize::new(32).unwrap(),
    };
    let layout = layout_page(&page, &LayoutConfig::default());
    assert_eq!((layout.width, layout.height), (700.0, 900.0));
    assert!(!layout.truncated);

    match &layout.primitives[0] {
        Primitive::Rect { fill: Some(fill), width, height, .. } => {
            assert_eq!(fill.color, palette::PAGE_BACKGROUND);
            assert_eq!((*width, *height), (700.0, 900.0));
        }
        other => panic!("expected background, got {other:?}"),
    }

    let heading = layout.texts_with_role(TextRole::Heading);
    assert_eq!(heading.len(), 1);
    assert_eq!(heading[0].text, "HTTP Errors");
    assert_eq!(heading[0].size, 32.0);
    assert_eq!(heading[0].letter_spacing, 2.0);

    let footer = layout.texts_with_role(TextRole::Footer);
    assert_eq!(footer[0].text, "Page 7");
    assert_eq!(footer[0].color, palette::FOOTER);

    let badge = layout.texts_with_role(TextRole::Badge);
    assert_eq!(badge[0].text, "404");

    let dots: Vec<_> = layout
        .primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Circle { cx, fill, .. } => Some((*cx, *fill)),
            _ => None,
        })
        .collect();
    assert_eq!(
        dots.iter().map(|d| d.1).collect::<Vec<_>>(),
        palette::DOTS.to_vec()
    );
    assert!(dots.windows(2).all(|w| w[1].0 - w[0].0 == 20.0));

    let labels: Vec<_> = layout
        .text_runs()
        .filter_map(|run| match run.role {
            TextRole::Label(_) => Some(run.text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(
        labels,
        vec!["Error Code:", "Category:", "Meaning:", "Details:", "Fix:"]
    );
}

#[test]
fn heading_and_panel_are_centered() {
    let record = entry("500");
    let page = PageDescriptor {
        entry: &record,
        page_number: 1,
        title_size: TitleSize::default(),
    };
    let layout = layout_page(&page, &LayoutConfig::default());
    let (x, _, w, h) = panel_rect(&layout.primitives);
    assert_eq!((w, h), (style::PANEL_WIDTH, style::PANEL_HEIGHT));
    assert_eq!(x + w / 2.0, 350.0);

    let footer = &layout.texts_with_role(TextRole::Footer)[0];
    assert!(footer.y < 900.0 - style::FOOTER_MARGIN);
}

#[test]
fn badge_is_right_aligned_in_panel() {
    let record = entry("503");
    let page = PageDescriptor {
        entry: &record,
        page_number: 1,
        title_size: TitleSize::default(),
    };
    let layout = layout_page(&page, &LayoutConfig::default());
    let (x, _, w, _) = panel_rect(&layout.primitives);
    let badge = &layout.texts_with_role(TextRole::Badge)[0];
    let badge_width = book_pdf::FontMetrics::measure_text("503", badge.font, badge.size);
    let right = badge.x + badge_width;
    assert!((right - (x + w - style::BADGE_INSET)).abs() < 1e-9);
}

#[test]
fn rows_stay_inside_panel_and_long_text_truncates() {
    let mut record = entry("413");
    record.details = "word ".repeat(600);
    let page = PageDescriptor {
        entry: &record,
        page_number: 1,
        title_size: TitleSize::default(),
    };
    let layout = layout_page(&page, &LayoutConfig::default());
    assert!(layout.truncated);

    let (x, y, w, h) = panel_rect(&layout.primitives);
    for run in layout.text_runs() {
        if matches!(run.role, TextRole::Label(_) | TextRole::Value(_)) {
            assert!(run.y > y && run.y < y + h, "{:?} outside panel", run.text);
            assert!(run.x >= x && run.x < x + w);
        }
    }
    assert!(!layout.texts_with_role(TextRole::Value(Field::Details)).is_empty());
}

#[test]
fn larger_page_moves_panel_down() {
    let record = entry("404");
    let page = PageDescriptor {
        entry: &record,
        page_number: 1,
        title_size: TitleSize::default(),
    };
    let small = layout_page(&page, &LayoutConfig::default());
    let tall = layout_page(
        &page,
        &LayoutConfig {
            page: PageSize {
                width: 700.0,
                height: 1100.0,
            },
        },
    );
    assert!(panel_rect(&tall.primitives).1 > panel_rect(&small.primitives).1);
}

#[test]
fn long_badge_is_shortened_between_dots_and_inset() {
    let code = "ERR_UPSTREAM_CONNECTION_TIMED_OUT_WHILE_WAITING_FOR_GATEWAY_RESPONSE";
    let record = entry(code);
    let page = PageDescriptor {
        entry: &record,
        page_number: 1,
        title_size: TitleSize::default(),
    };
    let layout = layout_page(&page, &LayoutConfig::default());
    assert!(layout.truncated);

    let (x, _, w, _) = panel_rect(&layout.primitives);
    let last_dot_right = layout
        .primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Circle { cx, radius, .. } => Some(cx + radius),
            _ => None,
        })
        .fold(f64::MIN, f64::max);

    let badge = &layout.texts_with_role(TextRole::Badge)[0];
    assert!(badge.text.ends_with("..."));
    assert!(badge.text.starts_with("ERR_UPSTREAM"));
    let badge_width = book_pdf::FontMetrics::measure_text(&badge.text, badge.font, badge.size);
    assert!(badge.x >= last_dot_right);
    assert!(badge.x + badge_width <= x + w - style::BADGE_INSET + 1e-9);
}
