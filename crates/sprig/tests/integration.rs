//! Integration tests - element trees rendered into a real document
//!
//! Tests the complete workflow: Element → fibers → commit → Document

use std::cell::RefCell;
use std::rc::Rc;

use sprig::dom::{Document, NodeId};
use sprig::todo::{INITIAL_TEXT, app, todo_app};
use sprig::{
    CommitSummary, Component, Config, CountdownDeadline, Element, EventHandler, RenderError,
    Runtime, RuntimeError, Unbounded, WorkOutcome,
};

fn heading(title: Option<&str>) -> Element {
    let mut h1 = Element::host("h1");
    if let Some(title) = title {
        h1 = h1.attr("title", title);
    }
    h1.child("Hi").build()
}

fn children(doc: &Document, id: NodeId) -> Vec<NodeId> {
    doc.tree().children(id).map(|(id, _)| id).collect()
}

fn first(doc: &Document, tag: &str) -> NodeId {
    doc.get_elements_by_tag_name(tag)[0]
}

fn counter() -> Component {
    Component::new("Counter", |cx, _props| {
        let (count, set_count) = cx.use_state(1);
        Element::host("button")
            .on("click", EventHandler::new(move |_| set_count.update(|n| n + 1)))
            .child(count)
            .build()
    })
}

// ============================================================================
// FIRST RENDER AND RE-RENDER
// ============================================================================

#[test]
fn test_heading_renders_into_body() {
    let mut rt = Runtime::default();
    rt.render(heading(Some("t")));
    rt.run_until_idle().unwrap();

    let doc = rt.document();
    let body = children(doc, doc.body());
    assert_eq!(body.len(), 1);

    let h1 = body[0];
    assert_eq!(doc.tree().tag_name(h1), Some("h1"));
    assert_eq!(doc.tree().get_attribute(h1, "title"), Some("t"));

    let kids = children(doc, h1);
    assert_eq!(kids.len(), 1);
    assert_eq!(doc.tree().get(kids[0]).unwrap().as_text(), Some("Hi"));
    assert_eq!(doc.body_html(), r#"<h1 title="t">Hi</h1>"#);
}

#[test]
fn test_removed_title_resets_on_same_node() {
    let mut rt = Runtime::default();
    rt.render(heading(Some("t")));
    rt.run_until_idle().unwrap();
    let h1 = first(rt.document(), "h1");

    rt.render(heading(None));
    rt.run_until_idle().unwrap();

    assert_eq!(first(rt.document(), "h1"), h1);
    assert_eq!(rt.document().tree().get_attribute(h1, "title"), Some(""));
}

#[test]
fn test_same_tree_twice_is_structurally_unchanged() {
    let mut rt = Runtime::default();
    rt.render(heading(Some("t")));
    rt.run_until_idle().unwrap();
    let before = rt.document().tree().len();
    let h1 = first(rt.document(), "h1");

    rt.render(heading(Some("t")));
    let outcome = rt.on_idle(&Unbounded).unwrap();

    match outcome {
        WorkOutcome::Committed { summary, .. } => assert!(summary.is_structurally_unchanged()),
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(first(rt.document(), "h1"), h1);
    assert_eq!(rt.document().tree().len(), before, "no new nodes created");
}

#[test]
fn test_type_change_replaces_node() {
    let mut rt = Runtime::default();
    rt.render(Element::host("div").child(Element::host("p")).build());
    rt.run_until_idle().unwrap();
    let div = first(rt.document(), "div");

    rt.render(Element::host("div").child(Element::host("span")).build());
    let outcome = rt.on_idle(&Unbounded).unwrap();

    assert!(matches!(
        outcome,
        WorkOutcome::Committed { summary: CommitSummary { added: 1, deleted: 1, .. }, .. }
    ));
    assert_eq!(first(rt.document(), "div"), div);
    assert_eq!(rt.document().body_html(), "<div><span></span></div>");
}

// ============================================================================
// EVENTS AND HOOKS
// ============================================================================

#[test]
fn test_hook_state_persists_across_clicks() {
    let mut rt = Runtime::default();
    rt.render(Element::component(&counter()).build());
    rt.run_until_idle().unwrap();
    let button = first(rt.document(), "button");
    assert_eq!(rt.document().tree().text_content(button), "1");

    for _ in 0..3 {
        rt.document().fire(button, "click").unwrap();
        rt.run_until_idle().unwrap();
    }

    assert_eq!(first(rt.document(), "button"), button);
    assert_eq!(rt.document().tree().text_content(button), "4");
}

#[test]
fn test_updates_between_ticks_coalesce() {
    let mut rt = Runtime::default();
    rt.render(Element::component(&counter()).build());
    rt.run_until_idle().unwrap();
    let button = first(rt.document(), "button");

    for _ in 0..3 {
        rt.document().fire(button, "click").unwrap();
    }
    let outcome = rt.on_idle(&Unbounded).unwrap();

    assert!(matches!(outcome, WorkOutcome::Committed { .. }));
    assert!(!rt.has_pending_work());
    assert_eq!(rt.document().tree().text_content(button), "4");
}

#[test]
fn test_listener_churn() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let handler = |tag: &'static str| {
        let log = log.clone();
        EventHandler::new(move |_| log.borrow_mut().push(tag))
    };
    let button = |h: Option<EventHandler>| {
        let mut b = Element::host("button");
        if let Some(h) = h {
            b = b.on("click", h);
        }
        b.build()
    };
    let a = handler("a");

    let mut rt = Runtime::default();
    rt.render(button(Some(a.clone())));
    rt.run_until_idle().unwrap();
    let node = first(rt.document(), "button");

    rt.render(button(Some(a.clone())));
    rt.run_until_idle().unwrap();
    assert_eq!(rt.document().tree().listener_count(node, "click"), 1);

    rt.render(button(Some(handler("b"))));
    rt.run_until_idle().unwrap();
    assert_eq!(rt.document().tree().listener_count(node, "click"), 1);
    rt.document().fire(node, "click").unwrap();
    assert_eq!(*log.borrow(), vec!["b"]);

    rt.render(button(None));
    rt.run_until_idle().unwrap();
    assert_eq!(rt.document().tree().listener_count(node, "click"), 0);
}

// ============================================================================
// SCHEDULING
// ============================================================================

#[test]
fn test_nothing_mutates_until_commit() {
    let mut rt = Runtime::default();
    let list = Element::host("ul")
        .children(["a", "b", "c"].map(|s| Element::host("li").child(s)))
        .build();
    rt.render(list);

    let mut ticks = 0;
    loop {
        ticks += 1;
        match rt.on_idle(&CountdownDeadline::slots(2)).unwrap() {
            WorkOutcome::Yielded { walked } => {
                assert_eq!(walked, 2);
                assert_eq!(rt.document().body_html(), "");
            }
            WorkOutcome::Committed { .. } => break,
            WorkOutcome::Idle => panic!("went idle before committing"),
        }
    }

    // root, ul, three li and three text fibers
    assert_eq!(ticks, 4);
    assert_eq!(
        rt.document().body_html(),
        "<ul><li>a</li><li>b</li><li>c</li></ul>"
    );
}

#[test]
fn test_state_update_mid_walk_restarts_from_committed_tree() {
    let mut rt = Runtime::default();
    rt.render(Element::component(&counter()).build());
    rt.run_until_idle().unwrap();
    let button = first(rt.document(), "button");

    rt.render(Element::host("h2").child("other").build());
    assert!(matches!(rt.step().unwrap(), WorkOutcome::Yielded { .. }));

    rt.document().fire(button, "click").unwrap();
    rt.run_until_idle().unwrap();

    assert_eq!(rt.document().body_html(), "<button>2</button>");
    assert!(rt.document().get_elements_by_tag_name("h2").is_empty());
}

#[test]
fn test_idle_budget_commits_small_tree_in_one_tick() {
    let mut rt = Runtime::new(Config::default());
    rt.render(heading(Some("t")));

    assert_eq!(rt.run_until_idle().unwrap(), 1);
}

// ============================================================================
// COMPONENTS
// ============================================================================

#[test]
fn test_component_children_are_transparent() {
    let label = Component::new("Label", |_cx, props| {
        Element::host("li")
            .child(props.get_str("text").unwrap_or_default())
            .build()
    });
    let list = |n: usize| {
        Element::host("ul")
            .children((0..n).map(|i| Element::component(&label).attr("text", format!("item {i}"))))
            .build()
    };

    let mut rt = Runtime::default();
    rt.render(list(2));
    rt.run_until_idle().unwrap();
    let ul = first(rt.document(), "ul");
    assert_eq!(rt.document().tree().inner_html(ul), "<li>item 0</li><li>item 1</li>");

    rt.render(list(3));
    rt.run_until_idle().unwrap();
    assert_eq!(children(rt.document(), ul).len(), 3);

    rt.render(list(1));
    rt.run_until_idle().unwrap();
    assert_eq!(rt.document().tree().inner_html(ul), "<li>item 0</li>");
}

#[test]
fn test_target_failure_surfaces_as_render_error() {
    let mut rt = Runtime::default();
    let text = rt.document_mut().tree_mut().create_text("not a container");
    rt.render_into(Element::host("p").build(), text);

    let err = rt.run_until_idle().unwrap_err();

    assert!(matches!(err, RuntimeError::Render(RenderError::Target(_))));
    assert!(!rt.has_pending_work());
}

// ============================================================================
// DEMO APP
// ============================================================================

fn li_texts(doc: &Document) -> Vec<String> {
    doc.get_elements_by_tag_name("li")
        .into_iter()
        .map(|li| doc.tree().text_content(li))
        .collect()
}

fn type_and_submit(rt: &mut Runtime, text: &str) {
    let input = first(rt.document(), "input");
    let form = first(rt.document(), "form");

    rt.document_mut().set_value(input, text).unwrap();
    rt.document().fire(input, "input").unwrap();
    rt.run_until_idle().unwrap();

    let proceed = rt.document().fire(form, "submit").unwrap();
    assert!(!proceed, "submit handler prevents the default action");
    rt.run_until_idle().unwrap();
}

#[test]
fn test_todo_initial_render() {
    let mut rt = Runtime::default();
    let app = app();
    rt.render(todo_app(&app, "Todos"));
    rt.run_until_idle().unwrap();

    let doc = rt.document();
    assert_eq!(doc.tree().text_content(first(doc, "h1")), "Todos");
    assert_eq!(
        doc.tree().get_attribute(first(doc, "input"), "value"),
        Some(INITIAL_TEXT)
    );
    assert_eq!(doc.tree().text_content(first(doc, "button")), "Add todo");
    assert!(li_texts(doc).is_empty());
}

#[test]
fn test_todo_add_items() {
    let mut rt = Runtime::default();
    let app = app();
    rt.render(todo_app(&app, "Todos"));
    rt.run_until_idle().unwrap();
    let input = first(rt.document(), "input");

    type_and_submit(&mut rt, "milk");
    assert_eq!(li_texts(rt.document()), vec!["milk"]);
    assert_eq!(rt.document().tree().get_attribute(input, "value"), Some(""));

    type_and_submit(&mut rt, "eggs");
    assert_eq!(li_texts(rt.document()), vec!["milk", "eggs"]);
    assert_eq!(first(rt.document(), "input"), input);

    // list items follow the form inside the layout div
    let div = first(rt.document(), "div");
    assert_eq!(children(rt.document(), div).len(), 4);
}

#[test]
fn test_todo_blank_text_is_ignored() {
    let mut rt = Runtime::default();
    let app = app();
    rt.render(todo_app(&app, "Todos"));
    rt.run_until_idle().unwrap();

    type_and_submit(&mut rt, "   ");

    assert!(li_texts(rt.document()).is_empty());
}

#[test]
fn test_todo_rerender_keeps_items() {
    let mut rt = Runtime::default();
    let app = app();
    rt.render(todo_app(&app, "Todos"));
    rt.run_until_idle().unwrap();
    type_and_submit(&mut rt, "milk");
    let div = first(rt.document(), "div");

    rt.render(todo_app(&app, "Groceries"));
    rt.run_until_idle().unwrap();

    assert_eq!(first(rt.document(), "div"), div);
    let doc = rt.document();
    assert_eq!(doc.tree().text_content(first(doc, "h1")), "Groceries");
    assert_eq!(li_texts(rt.document()), vec!["milk"]);
}
