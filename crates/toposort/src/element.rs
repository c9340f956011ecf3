//! Element identity
//!
//! Every node wraps one caller element and is keyed by the element's name.
//! A name comes from the first capability the element answers, in order:
//!
//! 1. a native name ([`Element::name`])
//! 2. the element's own text ([`Element::as_text`]), provided for `str`,
//!    `String` and `Cow<str>`
//! 3. a rendered form ([`Element::render`]), provided by [`Rendered`] for
//!    any `Display` type
//!
//! An element answering none of them is rejected with
//! [`GraphError::UnsupportedType`].

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{GraphError, GraphResult};

/// A value that can be placed into a [`Graph`](crate::Graph).
///
/// All methods default to `None`; implement the one that fits the type.
///
/// # Examples
///
/// ```
/// use std::borrow::Cow;
/// use toposort::{Element, Graph};
///
/// struct Package {
///     crate_name: String,
/// }
///
/// impl Element for Package {
///     fn name(&self) -> Option<Cow<'_, str>> {
///         Some(Cow::Borrowed(&self.crate_name))
///     }
/// }
///
/// let mut graph = Graph::new(1);
/// graph.add_node(Package { crate_name: "serde".to_string() }).unwrap();
/// assert!(graph.contains_node("serde"));
/// ```
pub trait Element {
    /// Native name of the element
    fn name(&self) -> Option<Cow<'_, str>> {
        None
    }

    /// The element itself, when it is plain text
    fn as_text(&self) -> Option<&str> {
        None
    }

    /// Text rendering of the element
    fn render(&self) -> Option<String> {
        None
    }
}

/// Resolves the node name of an element.
///
/// # Errors
///
/// Returns [`GraphError::UnsupportedType`] if the element answers none of
/// the identity capabilities.
pub fn identity<E: Element + ?Sized>(element: &E) -> GraphResult<String> {
    element
        .name()
        .map(Cow::into_owned)
        .or_else(|| element.as_text().map(str::to_owned))
        .or_else(|| element.render())
        .ok_or_else(|| GraphError::unsupported_type(std::any::type_name::<E>()))
}

/// Maps a sequence of elements, typically a sort result, to their names.
///
/// # Errors
///
/// Returns [`GraphError::UnsupportedType`] for the first element without an
/// identity.
pub fn names<E: Element + ?Sized>(elements: &[&E]) -> GraphResult<Vec<String>> {
    elements.iter().map(|element| identity(*element)).collect()
}

/// Adapter naming a `Display` value by its rendered text.
///
/// ```
/// use toposort::{Graph, Rendered};
///
/// let mut graph = Graph::new(2);
/// graph.add_nodes([Rendered(7), Rendered(11)]).unwrap();
/// graph.add_edge("7", "11").unwrap();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rendered<D>(pub D);

impl<D> Rendered<D> {
    /// Returns the wrapped value
    pub fn into_inner(self) -> D {
        self.0
    }

    pub const fn get(&self) -> &D {
        &self.0
    }
}

impl<D: fmt::Display> Element for Rendered<D> {
    fn render(&self) -> Option<String> {
        Some(self.0.to_string())
    }
}

impl<D: fmt::Display> fmt::Display for Rendered<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Element for str {
    fn as_text(&self) -> Option<&str> {
        Some(self)
    }
}

impl Element for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Element for Cow<'_, str> {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_ref())
    }
}

// Smart pointers answer with whatever the pointee answers.
macro_rules! forward_element {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<E: Element + ?Sized> Element for $ptr {
                fn name(&self) -> Option<Cow<'_, str>> {
                    (**self).name()
                }

                fn as_text(&self) -> Option<&str> {
                    (**self).as_text()
                }

                fn render(&self) -> Option<String> {
                    (**self).render()
                }
            }
        )*
    };
}

forward_element!(&E, Box<E>, Rc<E>, Arc<E>);
