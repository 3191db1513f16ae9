//! End-to-end authoring flows: toolbar actions over captured selections,
//! fragment insertion through the prompt flow, generation and the JSON
//! snapshot round-trip.

use pretty_assertions::assert_eq;
use richpress_engine::{FormatCommand, Inserted, InsertionRequest, PastePayload, Session};

/// A full article: metadata, formatted body, image, link, then generate.
#[test]
fn compose_and_generate_an_article() {
    let mut session = Session::new();
    session.metadata_mut().main_category_name = "科技".to_string();
    session.metadata_mut().main_category_url = "https://example.com/tech".to_string();
    session.metadata_mut().sub_category_name = "人工智慧".to_string();
    session.metadata_mut().title_text = "未來趨勢".to_string();

    // Type the opening text, then bold one word of it
    session.focus_editor();
    session.type_text("The future is here");
    session.set_selection(4, 10);
    session.save_selection();
    session.apply_format(FormatCommand::Bold);
    assert_eq!(session.content(), "The <strong>future</strong> is here");

    // A line break, then an image with caption via the prompt flow
    session.set_selection(session.content().len(), session.content().len());
    session.insert_line_break();
    session.save_selection();
    let outcome = session.insert_fragment(InsertionRequest::Image {
        url: "https://example.com/robot.jpg".to_string(),
        caption: "Robot".to_string(),
    });
    assert_eq!(outcome, Inserted::Done);

    // Typing continues below the figure
    session.type_text("More text. ");
    session.set_selection(session.content().len(), session.content().len());

    let html = session.generate().to_string();
    assert!(html.contains("<title>未來趨勢</title>"));
    assert!(html.contains(r#"<h1 class="title">未來趨勢</h1>"#));
    assert!(html.contains(
        r#"<a href="https://example.com/tech" target="_blank" rel="noopener noreferrer">科技</a>"#
    ));
    assert!(html.contains(" &gt; "));
    assert!(html.contains("<figcaption>▲ Robot</figcaption>"));
    assert!(html.contains("The <strong>future</strong> is here<br>"));
}

/// Link text precedence across the three fallback levels.
#[test]
fn link_text_precedence() {
    // displayText="" with selection "Click" -> anchor text "Click"
    let mut session = Session::new();
    session.focus_editor();
    session.type_text("Click me");
    session.set_selection(0, 5);
    session.save_selection();
    session.insert_fragment(InsertionRequest::Link {
        url: "https://x".to_string(),
        display_text: String::new(),
    });
    assert!(session.content().contains(">Click</a>"));

    // displayText="Go" wins over any selection
    let mut session = Session::new();
    session.focus_editor();
    session.type_text("Click me");
    session.set_selection(0, 5);
    session.save_selection();
    session.insert_fragment(InsertionRequest::Link {
        url: "https://x".to_string(),
        display_text: "Go".to_string(),
    });
    assert!(session.content().contains(">Go</a>"));

    // Neither display text nor selection: the URL is the text
    let mut session = Session::new();
    session.focus_editor();
    session.save_selection();
    session.insert_fragment(InsertionRequest::Link {
        url: "https://x".to_string(),
        display_text: String::new(),
    });
    assert!(session.content().contains(">https://x</a>"));
}

/// Pasting styled clipboard content must not create formatting nodes.
#[test]
fn paste_is_plain_text_coerced() {
    let mut session = Session::new();
    session.focus_editor();
    session.paste(&PastePayload {
        plain: "styled words".to_string(),
        marked_up: Some(
            r#"<b>styled</b> <span style="color: #f00">words</span>"#.to_string(),
        ),
    });

    assert_eq!(session.content(), "styled words");
    assert!(!session.document().snapshot().has_formatting());
}

/// Export, clear, re-import: every field and the content come back.
#[test]
fn snapshot_round_trip_through_clear() {
    let mut session = Session::new();
    session.metadata_mut().main_category_name = "Main".to_string();
    session.metadata_mut().sub_category_name = "Sub".to_string();
    session.metadata_mut().sub_category_url = "https://sub".to_string();
    session.metadata_mut().title_text = "Title".to_string();
    session.focus_editor();
    session.type_text("body");
    session.set_selection(0, 4);
    session.save_selection();
    session.apply_format(FormatCommand::Underline);

    let exported = session.export_snapshot().unwrap();
    let meta_before = session.metadata().clone();
    let content_before = session.content();

    session.clear_all();
    assert!(session.document().is_empty());

    session.import_snapshot(&exported).unwrap();
    assert_eq!(*session.metadata(), meta_before);
    assert_eq!(session.content(), content_before);
}

/// Generation never mutates the session: repeated runs are identical.
#[test]
fn generation_is_stable_across_runs() {
    let mut session = Session::new();
    session.metadata_mut().title_text = "T".to_string();
    session.focus_editor();
    session.type_text("fixed");

    let runs: Vec<String> = (0..3).map(|_| session.generate().to_string()).collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
    assert_eq!(session.content(), "fixed");
}
