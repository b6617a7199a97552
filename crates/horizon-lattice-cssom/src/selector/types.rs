//! Selector type definitions.

use std::fmt;

use crate::syntax::{ComponentValue, identifier_to_css, serialize_values, string_to_css};

/// A comma-separated list of complex selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    /// The selectors in source order.
    pub fn selectors(&self) -> &[Selector] {
        &self.0
    }

    /// Returns `true` if any selector contains the nesting selector `&`.
    pub fn contains_nesting(&self) -> bool {
        self.0.iter().any(Selector::contains_nesting)
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", selector)?;
        }
        Ok(())
    }
}

/// A complex selector (e.g., "svg|rect.primary:hover > text").
///
/// A selector consists of one or more compound selectors connected by combinators.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// Leading combinator of a relative selector (e.g., "> .child").
    pub leading: Option<Combinator>,
    /// Compound selectors from left to right.
    pub parts: Vec<SelectorPart>,
    /// Combinators between parts (length = parts.len() - 1).
    pub combinators: Vec<Combinator>,
}

impl Selector {
    /// Create a selector made of a single compound.
    pub fn compound(part: SelectorPart) -> Self {
        Self {
            leading: None,
            parts: vec![part],
            combinators: vec![],
        }
    }

    /// The implicit `:scope` selector.
    pub fn scope() -> Self {
        Self::compound(SelectorPart::new().with_simple(SimpleSelector::PseudoClass(
            PseudoClass::new("scope"),
        )))
    }

    /// Returns `true` if the selector contains `&` anywhere, including in
    /// selector arguments of pseudo-classes.
    pub fn contains_nesting(&self) -> bool {
        self.parts.iter().any(SelectorPart::contains_nesting)
    }

    /// Make a relative selector absolute by prefixing it with `&`.
    ///
    /// `.child` becomes `& .child` and `> .child` becomes `& > .child`.
    pub fn prefix_with_nesting(mut self) -> Self {
        let combinator = self.leading.take().unwrap_or(Combinator::Descendant);
        self.parts
            .insert(0, SelectorPart::new().with_simple(SimpleSelector::Nesting));
        self.combinators.insert(0, combinator);
        self
    }

    /// Namespace prefixes used anywhere in the selector.
    pub fn namespace_prefixes(&self) -> Vec<&str> {
        let mut prefixes = Vec::new();
        for part in &self.parts {
            part.collect_prefixes(&mut prefixes);
        }
        prefixes
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(leading) = self.leading {
            write!(f, "{} ", leading.symbol())?;
        }
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                match &self.combinators[i - 1] {
                    Combinator::Descendant => write!(f, " ")?,
                    other => write!(f, " {} ", other.symbol())?,
                }
            }
            write!(f, "{}", part)?;
        }
        Ok(())
    }
}

/// A compound selector (e.g., "button.primary:hover::before").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectorPart {
    /// Type or universal selector.
    pub type_selector: Option<TypeSelector>,
    /// Nesting, ID, class, attribute and pseudo-class selectors in source order.
    pub simple: Vec<SimpleSelector>,
    /// Pseudo-elements, each optionally followed by pseudo-classes.
    pub pseudo_elements: Vec<PseudoElement>,
}

impl SelectorPart {
    /// Create a new empty selector part.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a type-only selector.
    pub fn type_only(name: impl Into<String>) -> Self {
        Self {
            type_selector: Some(TypeSelector {
                namespace: None,
                name: Some(name.into()),
            }),
            ..Default::default()
        }
    }

    /// Create a class-only selector.
    pub fn class_only(class_name: impl Into<String>) -> Self {
        Self::new().with_simple(SimpleSelector::Class(class_name.into()))
    }

    /// Add a simple selector.
    pub fn with_simple(mut self, simple: SimpleSelector) -> Self {
        self.simple.push(simple);
        self
    }

    /// Check if this part has no selectors at all.
    pub fn is_empty(&self) -> bool {
        self.type_selector.is_none() && self.simple.is_empty() && self.pseudo_elements.is_empty()
    }

    fn contains_nesting(&self) -> bool {
        self.simple.iter().any(|simple| match simple {
            SimpleSelector::Nesting => true,
            SimpleSelector::PseudoClass(pseudo) => pseudo.contains_nesting(),
            _ => false,
        })
    }

    fn collect_prefixes<'a>(&'a self, prefixes: &mut Vec<&'a str>) {
        if let Some(TypeSelector {
            namespace: Some(NamespacePrefix::Named(prefix)),
            ..
        }) = &self.type_selector
        {
            prefixes.push(prefix);
        }
        for simple in &self.simple {
            match simple {
                SimpleSelector::Attribute(AttributeSelector {
                    namespace: Some(NamespacePrefix::Named(prefix)),
                    ..
                }) => prefixes.push(prefix),
                SimpleSelector::PseudoClass(PseudoClass {
                    argument: Some(PseudoArgument::Selectors(list)),
                    ..
                }) => {
                    for selector in &list.0 {
                        for part in &selector.parts {
                            part.collect_prefixes(prefixes);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl fmt::Display for SelectorPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(type_selector) = &self.type_selector {
            write!(f, "{}", type_selector)?;
        }

        for simple in &self.simple {
            write!(f, "{}", simple)?;
        }

        for pseudo in &self.pseudo_elements {
            write!(f, "{}", pseudo)?;
        }

        Ok(())
    }
}

/// Namespace prefix of a type or attribute selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NamespacePrefix {
    /// `*|` - any namespace.
    Any,
    /// `|` - no namespace.
    None,
    /// `prefix|` - a declared namespace prefix.
    Named(String),
}

impl fmt::Display for NamespacePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamespacePrefix::Any => write!(f, "*|"),
            NamespacePrefix::None => write!(f, "|"),
            NamespacePrefix::Named(prefix) => write!(f, "{}|", identifier_to_css(prefix)),
        }
    }
}

/// Type selector, optionally namespaced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeSelector {
    pub namespace: Option<NamespacePrefix>,
    /// Element name, or `None` for the universal selector (`*`).
    pub name: Option<String>,
}

impl fmt::Display for TypeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace) = &self.namespace {
            write!(f, "{}", namespace)?;
        }
        match &self.name {
            Some(name) => write!(f, "{}", identifier_to_css(name)),
            None => write!(f, "*"),
        }
    }
}

/// A simple selector other than a type selector or pseudo-element.
#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// `&`
    Nesting,
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[attr]`, `[attr=value]`, ...
    Attribute(AttributeSelector),
    /// `:hover`, `:not(...)`, ...
    PseudoClass(PseudoClass),
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimpleSelector::Nesting => write!(f, "&"),
            SimpleSelector::Id(id) => write!(f, "#{}", identifier_to_css(id)),
            SimpleSelector::Class(class) => write!(f, ".{}", identifier_to_css(class)),
            SimpleSelector::Attribute(attribute) => write!(f, "{}", attribute),
            SimpleSelector::PseudoClass(pseudo) => write!(f, "{}", pseudo),
        }
    }
}

/// Attribute matching operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeOperator {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

impl AttributeOperator {
    fn symbol(self) -> &'static str {
        match self {
            AttributeOperator::Equals => "=",
            AttributeOperator::Includes => "~=",
            AttributeOperator::DashMatch => "|=",
            AttributeOperator::Prefix => "^=",
            AttributeOperator::Suffix => "$=",
            AttributeOperator::Substring => "*=",
        }
    }
}

/// Attribute selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeSelector {
    pub namespace: Option<NamespacePrefix>,
    pub name: String,
    /// Operator and value, absent for presence tests (`[attr]`).
    pub matcher: Option<(AttributeOperator, String)>,
    /// Case-sensitivity modifier (`i` or `s`), lowercased.
    pub modifier: Option<char>,
}

impl fmt::Display for AttributeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        if let Some(namespace) = &self.namespace {
            write!(f, "{}", namespace)?;
        }
        write!(f, "{}", identifier_to_css(&self.name))?;
        if let Some((operator, value)) = &self.matcher {
            write!(f, "{}{}", operator.symbol(), string_to_css(value))?;
        }
        if let Some(modifier) = self.modifier {
            write!(f, " {}", modifier)?;
        }
        write!(f, "]")
    }
}

/// Pseudo-class selector (e.g. `:hover`, `:nth-child(2n+1)`, `:is(a, b)`).
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoClass {
    /// Lowercased name.
    pub name: String,
    pub argument: Option<PseudoArgument>,
}

impl PseudoClass {
    /// Create a pseudo-class without argument.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            argument: None,
        }
    }

    fn contains_nesting(&self) -> bool {
        match &self.argument {
            Some(PseudoArgument::Selectors(list)) => list.contains_nesting(),
            Some(PseudoArgument::Nth(_, Some(list))) => list.contains_nesting(),
            _ => false,
        }
    }
}

impl fmt::Display for PseudoClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.name)?;
        match &self.argument {
            None => Ok(()),
            Some(argument) => write!(f, "({})", argument),
        }
    }
}

/// Argument of a functional pseudo-class or pseudo-element.
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoArgument {
    /// A selector list (`:not()`, `:is()`, `:where()`, `:has()`).
    Selectors(SelectorList),
    /// An `An+B` expression with an optional `of <selector-list>`.
    Nth(NthExpr, Option<SelectorList>),
    /// Any other argument, kept as component values.
    Raw(Vec<ComponentValue>),
}

impl fmt::Display for PseudoArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PseudoArgument::Selectors(list) => write!(f, "{}", list),
            PseudoArgument::Nth(expr, None) => write!(f, "{}", expr),
            PseudoArgument::Nth(expr, Some(list)) => write!(f, "{} of {}", expr, list),
            PseudoArgument::Raw(values) => write!(f, "{}", serialize_values(values)),
        }
    }
}

/// Pseudo-element selector (e.g. `::before`, `::part(label)`).
#[derive(Debug, Clone, PartialEq)]
pub struct PseudoElement {
    /// Lowercased name.
    pub name: String,
    pub argument: Option<Vec<ComponentValue>>,
    /// User-action pseudo-classes following the pseudo-element.
    pub pseudo_classes: Vec<PseudoClass>,
}

impl fmt::Display for PseudoElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "::{}", self.name)?;
        if let Some(argument) = &self.argument {
            write!(f, "({})", serialize_values(argument))?;
        }
        for pseudo in &self.pseudo_classes {
            write!(f, "{}", pseudo)?;
        }
        Ok(())
    }
}

/// Combinator between selector parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Combinator {
    /// Descendant combinator (space): matches any descendant.
    Descendant,
    /// Child combinator (>): matches direct child only.
    Child,
    /// Adjacent sibling (+): matches immediately following sibling.
    AdjacentSibling,
    /// General sibling (~): matches any following sibling.
    GeneralSibling,
}

impl Combinator {
    fn symbol(self) -> &'static str {
        match self {
            Combinator::Descendant => "",
            Combinator::Child => ">",
            Combinator::AdjacentSibling => "+",
            Combinator::GeneralSibling => "~",
        }
    }
}

/// Expression for :nth-child (An+B).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NthExpr {
    /// Coefficient (A in An+B).
    pub a: i32,
    /// Offset (B in An+B).
    pub b: i32,
}

impl NthExpr {
    /// Create a new nth expression.
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// :nth-child(odd) = 2n+1.
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// :nth-child(even) = 2n.
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }
}

impl fmt::Display for NthExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.a, self.b) {
            (2, 1) => write!(f, "odd"),
            (2, 0) => write!(f, "even"),
            (0, b) => write!(f, "{}", b),
            (1, 0) => write!(f, "n"),
            (-1, 0) => write!(f, "-n"),
            (a, 0) => write!(f, "{}n", a),
            (1, b) if b > 0 => write!(f, "n+{}", b),
            (1, b) => write!(f, "n{}", b),
            (-1, b) if b > 0 => write!(f, "-n+{}", b),
            (-1, b) => write!(f, "-n{}", b),
            (a, b) if b > 0 => write!(f, "{}n+{}", a, b),
            (a, b) => write!(f, "{}n{}", a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display() {
        let sel = Selector {
            leading: None,
            parts: vec![
                SelectorPart::type_only("button"),
                SelectorPart::class_only("primary")
                    .with_simple(SimpleSelector::PseudoClass(PseudoClass::new("hover"))),
            ],
            combinators: vec![Combinator::Child],
        };
        assert_eq!(sel.to_string(), "button > .primary:hover");
    }

    #[test]
    fn prefix_with_nesting() {
        let relative = Selector {
            leading: Some(Combinator::AdjacentSibling),
            parts: vec![SelectorPart::class_only("child")],
            combinators: vec![],
        };
        assert_eq!(relative.to_string(), "+ .child");
        assert_eq!(relative.prefix_with_nesting().to_string(), "& + .child");

        let descendant = Selector::compound(SelectorPart::class_only("child"));
        let prefixed = descendant.prefix_with_nesting();
        assert_eq!(prefixed.to_string(), "& .child");
        assert!(prefixed.contains_nesting());
    }

    #[test]
    fn namespaced_type_display() {
        let part = SelectorPart {
            type_selector: Some(TypeSelector {
                namespace: Some(NamespacePrefix::Named("svg".into())),
                name: Some("rect".into()),
            }),
            ..Default::default()
        };
        let selector = Selector::compound(part);
        assert_eq!(selector.to_string(), "svg|rect");
        assert_eq!(selector.namespace_prefixes(), vec!["svg"]);
    }

    #[test]
    fn nth_expr_display() {
        assert_eq!(NthExpr::odd().to_string(), "odd");
        assert_eq!(NthExpr::even().to_string(), "even");
        assert_eq!(NthExpr::new(0, 3).to_string(), "3");
        assert_eq!(NthExpr::new(3, -2).to_string(), "3n-2");
        assert_eq!(NthExpr::new(-1, 4).to_string(), "-n+4");
    }
}
