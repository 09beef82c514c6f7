use super::Fragment;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Shared handle to a destination owned by the host document
pub type DestinationRef = Rc<Destination>;

/// What an index page entry needs to know about its target
pub trait PageDestination {
    /// Anchor identifier, unique within the document
    fn id(&self) -> &str;
    /// Human readable location, e.g. the enclosing section title
    fn label(&self) -> Option<&str>;
    fn url(&self) -> Option<&str>;
}

/// A document location that index entries point at.
///
/// Content attached during digestion (the formatted page number) is
/// appended through a shared reference, the way a document tree node gains
/// children.
#[derive(Debug, Default)]
pub struct Destination {
    id: String,
    label: Option<String>,
    url: Option<String>,
    content: RefCell<Vec<Fragment>>,
}

impl Destination {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn into_ref(self) -> DestinationRef {
        Rc::new(self)
    }

    pub fn append(&self, fragment: Fragment) {
        self.content.borrow_mut().push(fragment);
    }

    pub fn content(&self) -> Ref<'_, Vec<Fragment>> {
        self.content.borrow()
    }
}

impl PageDestination for Destination {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_through_shared_ref() {
        let dest = Destination::new("idx-1").with_url("#idx-1").into_ref();
        let alias = Rc::clone(&dest);
        alias.append(Fragment::text("1"));
        assert_eq!(dest.content().len(), 1);
        assert_eq!(dest.url(), Some("#idx-1"));
        assert_eq!(dest.label(), None);
    }
}
