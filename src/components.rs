use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::style::{Scalar, Style};

/// One node of the UI tree.
///
/// A node owns its children, so attaching a child moves it: a node can never
/// have two parents and the tree can never contain a cycle.
///
/// Dropping is iterative. The derived `Clone`, `PartialEq` and `Debug` still
/// recurse once per level, so they are only safe on trees of moderate depth
/// (manifest-loaded trees are capped at 128 levels by the parsers).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ComponentDef")]
pub struct Component {
    /// Stable identifier, used as the DOM id when set.
    pub id: Option<String>,
    pub class_name: Option<String>,
    pub style: Style,
    pub children: Vec<Component>,
    pub kind: ComponentKind,
}

/// Variant tag plus variant-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComponentKind {
    Text(Text),
    Button(Button),
    Input(Input),
    Container,
    Image(Image),
    Link(Link),
    Textarea(Textarea),
    Checkbox(Checkbox),
    RadioButton(RadioButton),
    Select(Select),
    Slider(Slider),
    DatePicker(DatePicker),
    Card(Card),
    Modal(Modal),
    Navbar(Navbar),
    /// Any variant without a dedicated renderer.
    Generic(Generic),
}

impl ComponentKind {
    /// Variant name; generic nodes report the name they were authored with.
    pub fn type_name(&self) -> &str {
        match self {
            ComponentKind::Generic(g) => &g.name,
            other => other.variant_name(),
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            ComponentKind::Text(_) => "Text",
            ComponentKind::Button(_) => "Button",
            ComponentKind::Input(_) => "Input",
            ComponentKind::Container => "Container",
            ComponentKind::Image(_) => "Image",
            ComponentKind::Link(_) => "Link",
            ComponentKind::Textarea(_) => "Textarea",
            ComponentKind::Checkbox(_) => "Checkbox",
            ComponentKind::RadioButton(_) => "RadioButton",
            ComponentKind::Select(_) => "Select",
            ComponentKind::Slider(_) => "Slider",
            ComponentKind::DatePicker(_) => "DatePicker",
            ComponentKind::Card(_) => "Card",
            ComponentKind::Modal(_) => "Modal",
            ComponentKind::Navbar(_) => "Navbar",
            ComponentKind::Generic(_) => "Generic",
        }
    }

    /// Whether the renderer emits this variant's children.
    pub fn renders_children(&self) -> bool {
        matches!(
            self,
            ComponentKind::Container
                | ComponentKind::Card(_)
                | ComponentKind::Modal(_)
                | ComponentKind::Navbar(_)
                | ComponentKind::Generic(_)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    #[default]
    Button,
    Submit,
    Reset,
}

impl ButtonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Button => "button",
            ButtonType::Submit => "submit",
            ButtonType::Reset => "reset",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Button {
    pub text: String,
    pub button_type: ButtonType,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Input {
    /// Emitted only when truthy: a numeric `0` is dropped, the string `"0"` is kept.
    pub value: Option<Scalar>,
    pub placeholder: Option<String>,
    pub input_type: String,
    pub disabled: bool,
    pub readonly: bool,
    pub required: bool,
    pub max_length: Option<u32>,
    pub min: Option<Scalar>,
    pub max: Option<Scalar>,
    pub step: Option<Scalar>,
}

impl Default for Input {
    fn default() -> Self {
        Self {
            value: None,
            placeholder: None,
            input_type: "text".to_string(),
            disabled: false,
            readonly: false,
            required: false,
            max_length: None,
            min: None,
            max: None,
            step: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub width: Option<Scalar>,
    pub height: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    pub text: String,
    pub target: String,
}

impl Default for Link {
    fn default() -> Self {
        Self {
            href: String::new(),
            text: String::new(),
            target: "_self".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Textarea {
    pub value: String,
    pub placeholder: Option<String>,
    pub rows: u32,
    pub cols: u32,
    pub disabled: bool,
    pub readonly: bool,
    pub required: bool,
    pub max_length: Option<u32>,
}

impl Default for Textarea {
    fn default() -> Self {
        Self {
            value: String::new(),
            placeholder: None,
            rows: 4,
            cols: 50,
            disabled: false,
            readonly: false,
            required: false,
            max_length: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Checkbox {
    pub label: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub checked: bool,
    pub disabled: bool,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioButton {
    pub label: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub checked: bool,
    pub disabled: bool,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Select {
    pub options: Vec<SelectOption>,
    pub value: Option<String>,
    pub placeholder: Option<String>,
    pub multiple: bool,
    pub disabled: bool,
    pub required: bool,
    pub size: Option<u32>,
}

impl Select {
    pub fn add_option(&mut self, option: SelectOption) {
        self.options.push(option);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Slider {
    pub min: Scalar,
    pub max: Scalar,
    pub value: Scalar,
    pub step: Scalar,
    pub label: Option<String>,
    pub show_value: bool,
    pub orientation: Orientation,
    pub disabled: bool,
}

impl Default for Slider {
    fn default() -> Self {
        Self {
            min: Scalar::Int(0),
            max: Scalar::Int(100),
            value: Scalar::Int(50),
            step: Scalar::Int(1),
            label: None,
            show_value: false,
            orientation: Orientation::Horizontal,
            disabled: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatePicker {
    pub value: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub placeholder: Option<String>,
    /// Renders `datetime-local` instead of `date`.
    pub include_time: bool,
    /// Wraps the control in an inline calendar container.
    pub inline: bool,
    pub disabled: bool,
    pub readonly: bool,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Card {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modal {
    pub title: Option<String>,
    pub is_open: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Navbar {
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Generic {
    pub name: String,
}

macro_rules! impl_into_kind {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<$ty> for ComponentKind {
                fn from(payload: $ty) -> Self {
                    ComponentKind::$ty(payload)
                }
            }
        )*
    };
}

impl_into_kind!(
    Text, Button, Input, Image, Link, Textarea, Checkbox, RadioButton, Select, Slider, DatePicker,
    Card, Modal, Navbar, Generic,
);

impl Component {
    pub fn new(kind: impl Into<ComponentKind>) -> Self {
        Self {
            id: None,
            class_name: None,
            style: Style::new(),
            children: Vec::new(),
            kind: kind.into(),
        }
    }

    pub fn container() -> Self {
        Self::new(ComponentKind::Container)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Text { text: text.into() })
    }

    pub fn button(text: impl Into<String>) -> Self {
        Self::new(Button {
            text: text.into(),
            ..Default::default()
        })
    }

    pub fn card(title: impl Into<String>) -> Self {
        Self::new(Card {
            title: Some(title.into()),
        })
    }

    pub fn generic(name: impl Into<String>) -> Self {
        Self::new(Generic { name: name.into() })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn style_prop(mut self, property: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.style.set(property, value);
        self
    }

    pub fn child(mut self, child: Component) -> Self {
        self.add_child(child);
        self
    }

    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Pre-order walk over this node and all of its descendants, with paths.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(TreePath::root(), self)],
        }
    }

    /// Pre-order walk without path bookkeeping.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Component> {
        self.descendants().find(|c| c.id.as_deref() == Some(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Component> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id.as_deref() == Some(id) {
                return Some(node);
            }
            stack.extend(node.children.iter_mut().rev());
        }
        None
    }

    /// The node whose children include the node with `id`.
    pub fn find_parent_of(&self, id: &str) -> Option<&Component> {
        self.descendants()
            .find(|c| c.children.iter().any(|ch| ch.id.as_deref() == Some(id)))
    }

    pub fn count(&self) -> usize {
        self.descendants().count()
    }

    /// Deepest level below this node; a node without children has depth 0.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        deepest
    }

    pub fn summary(&self) -> ComponentSummary<'_> {
        ComponentSummary {
            kind: self.kind.type_name(),
            id: self.id.as_deref(),
            class_name: self.class_name.as_deref(),
            style: &self.style,
            props: &self.kind,
            children: self.children.iter().map(Component::summary).collect(),
        }
    }
}

impl Drop for Component {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Position of a node, as child indexes from the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath(Vec<usize>);

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        TreePath(path)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("root")?;
        for index in &self.0 {
            write!(f, ".children[{}]", index)?;
        }
        Ok(())
    }
}

/// Iterative pre-order traversal; deep trees do not grow the call stack.
pub struct Walk<'a> {
    stack: Vec<(TreePath, &'a Component)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (TreePath, &'a Component);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        for (i, child) in node.children.iter().enumerate().rev() {
            self.stack.push((path.child(i), child));
        }
        Some((path, node))
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Read-only view of a tree for inspection output.
#[derive(Debug, Serialize)]
pub struct ComponentSummary<'a> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<&'a str>,
    pub style: &'a Style,
    pub props: &'a ComponentKind,
    pub children: Vec<ComponentSummary<'a>>,
}

/// Authoring form of a component in an app manifest.
#[derive(Debug, Deserialize)]
struct ComponentDef {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    style: Style,
    #[serde(default)]
    children: Vec<Component>,
    #[serde(flatten)]
    props: serde_yaml::Mapping,
}

impl TryFrom<ComponentDef> for Component {
    type Error = String;

    fn try_from(def: ComponentDef) -> Result<Self, Self::Error> {
        let props = def.props;
        let kind = match def.kind.as_str() {
            "Text" => payload::<Text>(props).map(ComponentKind::Text),
            "Button" => payload::<Button>(props).map(ComponentKind::Button),
            "Input" => payload::<Input>(props).map(ComponentKind::Input),
            "Container" => Ok(ComponentKind::Container),
            "Image" => payload::<Image>(props).map(ComponentKind::Image),
            "Link" => payload::<Link>(props).map(ComponentKind::Link),
            "Textarea" => payload::<Textarea>(props).map(ComponentKind::Textarea),
            "Checkbox" => payload::<Checkbox>(props).map(ComponentKind::Checkbox),
            "RadioButton" => payload::<RadioButton>(props).map(ComponentKind::RadioButton),
            "Select" => payload::<Select>(props).map(ComponentKind::Select),
            "Slider" => payload::<Slider>(props).map(ComponentKind::Slider),
            "DatePicker" => payload::<DatePicker>(props).map(ComponentKind::DatePicker),
            "Card" => payload::<Card>(props).map(ComponentKind::Card),
            "Modal" => payload::<Modal>(props).map(ComponentKind::Modal),
            "Navbar" => payload::<Navbar>(props).map(ComponentKind::Navbar),
            other => Ok(ComponentKind::Generic(Generic {
                name: other.to_string(),
            })),
        }
        .map_err(|e| format!("invalid {} component: {}", def.kind, e))?;

        Ok(Component {
            id: def.id,
            class_name: def.class_name,
            style: def.style,
            children: def.children,
            kind,
        })
    }
}

fn payload<T: DeserializeOwned>(props: serde_yaml::Mapping) -> Result<T, serde_yaml::Error> {
    serde_yaml::from_value(serde_yaml::Value::Mapping(props))
}
