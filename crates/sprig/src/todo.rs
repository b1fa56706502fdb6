//! Todo list demo
//!
//! `App` renders a title, a form with a text input and a submit button, and
//! one `Item` per submitted todo.

use sprig_core::{Component, Element, Event, EventHandler};

const FIELD_STYLE: &str = "height:2em;border-radius:8px;padding:4px;box-sizing:border-box;";
const LAYOUT_STYLE: &str =
    "display:flex;flex-direction:column;gap:1em;align-items:flex-start;max-width:90%;margin:1rem auto;";

/// Initial content of the text field
pub const INITIAL_TEXT: &str = "initial text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: usize,
    pub text: String,
}

/// `<li>{text}</li>`
pub fn item() -> Component {
    Component::new("Item", |_cx, props| {
        Element::host("li")
            .child(props.get_str("text").unwrap_or_default())
            .build()
    })
}

/// The todo app; reads its heading from the `title` prop
pub fn app() -> Component {
    let item = item();
    Component::new("App", move |cx, props| {
        let (text, set_text) = cx.use_state(INITIAL_TEXT.to_string());
        let (todos, set_todos) = cx.use_state(Vec::<Todo>::new());

        let on_submit = {
            let text = text.clone();
            let set_text = set_text.clone();
            EventHandler::new(move |e: &Event| {
                e.prevent_default();
                if text.trim().is_empty() {
                    return;
                }
                let text = text.clone();
                set_todos.update(move |todos| {
                    let mut next = todos.clone();
                    next.push(Todo { id: todos.len() + 1, text });
                    next
                });
                set_text.set(String::new());
            })
        };
        let on_input = EventHandler::new(move |e: &Event| {
            set_text.set(e.value.clone().unwrap_or_default());
        });

        Element::host("div")
            .attr("style", LAYOUT_STYLE)
            .child(Element::host("h1").child(props.get_str("title").unwrap_or_default()))
            .child(
                Element::host("form")
                    .on("submit", on_submit)
                    .child(
                        Element::host("input")
                            .attr("value", text.as_str())
                            .attr("style", FIELD_STYLE)
                            .on("input", on_input),
                    )
                    .child(
                        Element::host("button")
                            .attr("type", "submit")
                            .attr("style", FIELD_STYLE)
                            .child("Add todo"),
                    ),
            )
            .children(todos.iter().map(|todo| {
                Element::component(&item)
                    .attr("id", todo.id)
                    .attr("text", todo.text.as_str())
            }))
            .build()
    })
}

/// `<App title={title} />`
///
/// Pass the same `app()` component on every render; a fresh one is a new
/// type and remounts the app with empty state.
pub fn todo_app(app: &Component, title: &str) -> Element {
    Element::component(app).attr("title", title).build()
}
