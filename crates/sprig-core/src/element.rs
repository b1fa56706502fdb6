//! Element Builder
//!
//! Immutable description tree handed to the reconciler. Scalar children are
//! normalized into text elements when the tree is built, and the element kind
//! (host tag, text, component) is resolved once here rather than re-inspected
//! during the walk.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::{RenderError, RenderResult};
use crate::event::EventHandler;
use crate::hooks::HookContext;
use crate::props::PropKind;

/// Prop key holding a text element's content
pub const NODE_VALUE: &str = "nodeValue";

/// Reserved prop key for the child list
pub const CHILDREN: &str = "children";

/// A single property value
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Handler(EventHandler),
}

impl PropValue {
    /// Value used to reset a removed attribute
    pub fn empty() -> Self {
        PropValue::Str(String::new())
    }

    pub fn as_handler(&self) -> Option<&EventHandler> {
        match self {
            PropValue::Handler(h) => Some(h),
            _ => None,
        }
    }

    /// String form written to the render target (`None` for handlers)
    pub fn to_attr_string(&self) -> Option<String> {
        match self {
            PropValue::Str(s) => Some(s.clone()),
            PropValue::Int(n) => Some(n.to_string()),
            PropValue::Float(n) => Some(n.to_string()),
            PropValue::Bool(b) => Some(b.to_string()),
            PropValue::Handler(_) => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(s: &str) -> Self {
        PropValue::Str(s.to_string())
    }
}

impl From<String> for PropValue {
    fn from(s: String) -> Self {
        PropValue::Str(s)
    }
}

impl From<&String> for PropValue {
    fn from(s: &String) -> Self {
        PropValue::Str(s.clone())
    }
}

impl From<i32> for PropValue {
    fn from(n: i32) -> Self {
        PropValue::Int(n as i64)
    }
}

impl From<i64> for PropValue {
    fn from(n: i64) -> Self {
        PropValue::Int(n)
    }
}

impl From<u32> for PropValue {
    fn from(n: u32) -> Self {
        PropValue::Int(n as i64)
    }
}

impl From<usize> for PropValue {
    fn from(n: usize) -> Self {
        PropValue::Int(n as i64)
    }
}

impl From<f64> for PropValue {
    fn from(n: f64) -> Self {
        PropValue::Float(n)
    }
}

impl From<bool> for PropValue {
    fn from(b: bool) -> Self {
        PropValue::Bool(b)
    }
}

impl From<EventHandler> for PropValue {
    fn from(h: EventHandler) -> Self {
        PropValue::Handler(h)
    }
}

/// Property map of an element
///
/// `children` is kept apart from the keyed values so it is always present
/// and always ordered.
#[derive(Debug, Clone, Default)]
pub struct Props {
    values: BTreeMap<String, PropValue>,
    children: Vec<Element>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_children(children: Vec<Element>) -> Self {
        Self {
            values: BTreeMap::new(),
            children,
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.values.get(key)
    }

    /// String value of a key, if it is a string prop
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(PropValue::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keyed values in key order (children excluded)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Component render function
pub type RenderFn = dyn Fn(&mut HookContext<'_>, &Props) -> Element;

/// Function component
///
/// Two components are the same type only if they share the same render
/// function allocation; clone a `Component` to reuse it.
#[derive(Clone)]
pub struct Component {
    name: Rc<str>,
    render: Rc<RenderFn>,
}

impl Component {
    pub fn new(
        name: &str,
        render: impl Fn(&mut HookContext<'_>, &Props) -> Element + 'static,
    ) -> Self {
        Self {
            name: Rc::from(name),
            render: Rc::new(render),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn render(&self, cx: &mut HookContext<'_>, props: &Props) -> Element {
        (self.render)(cx, props)
    }

    pub fn same_as(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.render, &other.render)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Component").field(&self.name).finish()
    }
}

/// Element kind, resolved at build time
#[derive(Debug, Clone)]
pub enum ElementType {
    /// Render target tag ("div", "h1", ...)
    Host(String),
    /// Text node
    Text,
    /// Function component
    Component(Component),
}

impl From<&str> for ElementType {
    fn from(tag: &str) -> Self {
        ElementType::Host(tag.to_string())
    }
}

impl From<String> for ElementType {
    fn from(tag: String) -> Self {
        ElementType::Host(tag)
    }
}

impl From<Component> for ElementType {
    fn from(c: Component) -> Self {
        ElementType::Component(c)
    }
}

impl From<&Component> for ElementType {
    fn from(c: &Component) -> Self {
        ElementType::Component(c.clone())
    }
}

/// Immutable UI description node
#[derive(Debug, Clone)]
pub struct Element {
    ty: ElementType,
    props: Rc<Props>,
}

impl Element {
    /// Start building a host element
    pub fn host(tag: &str) -> ElementBuilder {
        ElementBuilder::new(tag)
    }

    /// Start building a component element
    pub fn component(component: &Component) -> ElementBuilder {
        ElementBuilder::new(component)
    }

    /// Text element holding a scalar value
    pub fn text(value: impl Into<PropValue>) -> Self {
        Self {
            ty: ElementType::Text,
            props: Rc::new(Props::new().with(NODE_VALUE, value)),
        }
    }

    pub fn ty(&self) -> &ElementType {
        &self.ty
    }

    pub fn props(&self) -> &Rc<Props> {
        &self.props
    }

    pub fn children(&self) -> &[Element] {
        &self.props.children
    }

    pub fn is_text(&self) -> bool {
        matches!(self.ty, ElementType::Text)
    }

    /// Host tag name, if this is a host element
    pub fn tag(&self) -> Option<&str> {
        match &self.ty {
            ElementType::Host(tag) => Some(tag),
            _ => None,
        }
    }
}

/// Child passed to the builder: an element or a scalar
#[derive(Debug, Clone)]
pub enum Child {
    Element(Element),
    Scalar(PropValue),
}

impl Child {
    fn into_element(self) -> Element {
        match self {
            Child::Element(e) => e,
            Child::Scalar(value) => Element::text(value),
        }
    }
}

impl From<Element> for Child {
    fn from(e: Element) -> Self {
        Child::Element(e)
    }
}

impl From<ElementBuilder> for Child {
    fn from(b: ElementBuilder) -> Self {
        Child::Element(b.build())
    }
}

macro_rules! scalar_child {
    ($($ty:ty),*) => {
        $(impl From<$ty> for Child {
            fn from(v: $ty) -> Self {
                Child::Scalar(PropValue::from(v))
            }
        })*
    };
}

scalar_child!(&str, String, &String, i32, i64, u32, usize, f64, bool);

/// Build an element from a type, props and children
///
/// Any children already present in `props` are replaced by `children`.
pub fn create_element(
    ty: impl Into<ElementType>,
    props: Props,
    children: impl IntoIterator<Item = Child>,
) -> Element {
    let mut props = props;
    props.children = children.into_iter().map(Child::into_element).collect();
    Element {
        ty: ty.into(),
        props: Rc::new(props),
    }
}

/// Fluent element builder
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    ty: ElementType,
    props: Props,
    children: Vec<Child>,
}

impl ElementBuilder {
    pub fn new(ty: impl Into<ElementType>) -> Self {
        Self {
            ty: ty.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    /// Set a prop
    pub fn attr(mut self, key: &str, value: impl Into<PropValue>) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Merge a prop map (later keys win)
    pub fn props(mut self, props: &Props) -> Self {
        for (key, value) in props.iter() {
            self.props.insert(key, value.clone());
        }
        self
    }

    /// Attach a handler for `event` ("click" becomes the `onClick` prop)
    pub fn on(mut self, event: &str, handler: EventHandler) -> Self {
        let mut key = String::with_capacity(event.len() + 2);
        key.push_str("on");
        let mut chars = event.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(chars.as_str());
        }
        self.props.insert(key, handler);
        self
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<C: Into<Child>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Build without validation
    pub fn build(self) -> Element {
        create_element(self.ty, self.props, self.children)
    }

    /// Build, rejecting malformed elements
    pub fn try_build(self) -> RenderResult<Element> {
        let element = self.build();
        validate(&element)?;
        Ok(element)
    }
}

/// Check an element tree for shapes the render target cannot express
pub fn validate(element: &Element) -> RenderResult<()> {
    if let ElementType::Host(tag) = element.ty() {
        if tag.is_empty() {
            return Err(RenderError::InvalidElement("empty host tag".into()));
        }
        if !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(RenderError::InvalidElement(format!("bad host tag {tag:?}")));
        }
    }

    for (key, value) in element.props().iter() {
        match (PropKind::classify(key), value) {
            (PropKind::Event(_), PropValue::Handler(_)) => {}
            (PropKind::Event(_), _) => {
                return Err(RenderError::InvalidElement(format!(
                    "event prop {key:?} does not hold a handler"
                )));
            }
            (_, PropValue::Handler(_)) => {
                return Err(RenderError::InvalidElement(format!(
                    "handler stored under non-event prop {key:?}"
                )));
            }
            _ => {}
        }
    }

    element.children().iter().try_for_each(validate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_with_type_and_props() {
        let element = create_element("div", Props::new(), Vec::<Child>::new());
        assert_eq!(element.tag(), Some("div"));
        assert!(element.props().is_empty());
        assert!(element.children().is_empty());
    }

    #[test]
    fn test_component_type() {
        let c = Component::new("Div", |_, _| Element::host("div").build());
        let element = Element::component(&c).build();

        match element.ty() {
            ElementType::Component(inner) => assert!(inner.same_as(&c)),
            other => panic!("expected component, got {other:?}"),
        }
        assert!(element.children().is_empty());
    }

    #[test]
    fn test_scalar_children_become_text() {
        let element = Element::host("p").child("Hi").child(3).child(Element::host("b")).build();

        let children = element.children();
        assert_eq!(children.len(), 3);
        assert!(children[0].is_text());
        assert_eq!(children[0].props().get(NODE_VALUE), Some(&PropValue::from("Hi")));
        assert_eq!(children[1].props().get(NODE_VALUE), Some(&PropValue::Int(3)));
        assert!(children[1].children().is_empty());
        assert_eq!(children[2].tag(), Some("b"));
    }

    #[test]
    fn test_on_builds_event_key() {
        let element = Element::host("button").on("click", EventHandler::new(|_| {})).build();
        assert!(element.props().get("onClick").is_some());
    }

    #[test]
    fn test_try_build_rejects_bad_tags() {
        assert!(Element::host("").try_build().is_err());
        assert!(Element::host("di v").try_build().is_err());
        assert!(Element::host("my-widget").try_build().is_ok());
    }

    #[test]
    fn test_try_build_checks_handlers() {
        let bad_event = Element::host("button").attr("onClick", "alert()").try_build();
        assert!(matches!(bad_event, Err(RenderError::InvalidElement(_))));

        let misplaced = Element::host("button")
            .attr("title", EventHandler::new(|_| {}))
            .try_build();
        assert!(misplaced.is_err());

        let nested = Element::host("div").child(Element::host("")).try_build();
        assert!(nested.is_err());
    }
}
