//! Document head backed by the browser DOM

use palour::head::{HeadError, HeadHost, HeadResource};
use web_sys::{Document, Element};

/// Marks elements this app appended
const OWNER_ATTRIBUTE: &str = "data-palour";

/// The live `document.head`
#[derive(Debug, Clone, Copy, Default)]
pub struct DomHead;

impl DomHead {
    fn document() -> Result<Document, HeadError> {
        web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| HeadError::NoHead("no window document".to_string()))
    }

    fn selector(resource: &HeadResource) -> String {
        match resource {
            HeadResource::Stylesheet { href } => {
                format!("link[rel=\"stylesheet\"][href=\"{}\"]", href)
            }
            HeadResource::Script { src } => format!("script[src=\"{}\"]", src),
        }
    }

    /// The element for `resource`, wherever the page declared it
    pub fn find(resource: &HeadResource) -> Option<Element> {
        let document = Self::document().ok()?;
        document
            .query_selector(&Self::selector(resource))
            .ok()
            .flatten()
    }

    fn create(document: &Document, resource: &HeadResource) -> Result<Element, HeadError> {
        let append_error = |reason: String| HeadError::Append {
            resource: resource.to_string(),
            reason,
        };

        let (tag, attributes): (&str, Vec<(&str, &str)>) = match resource {
            HeadResource::Stylesheet { href } => ("link", vec![("rel", "stylesheet"), ("href", href.as_str())]),
            HeadResource::Script { src } => ("script", vec![("src", src.as_str()), ("async", "")]),
        };

        let element = document
            .create_element(tag)
            .map_err(|e| append_error(format!("{:?}", e)))?;
        for (name, value) in attributes.into_iter().chain([(OWNER_ATTRIBUTE, "")]) {
            element
                .set_attribute(name, value)
                .map_err(|e| append_error(format!("{:?}", e)))?;
        }
        Ok(element)
    }
}

impl HeadHost for DomHead {
    fn contains(&self, resource: &HeadResource) -> bool {
        Self::find(resource).is_some()
    }

    fn append(&self, resource: &HeadResource) -> Result<(), HeadError> {
        let document = Self::document()?;
        let head = document
            .head()
            .ok_or_else(|| HeadError::NoHead("document has no <head>".to_string()))?;

        let element = Self::create(&document, resource)?;
        head.append_child(&element).map_err(|e| HeadError::Append {
            resource: resource.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(())
    }

    fn remove(&self, resource: &HeadResource) -> Result<(), HeadError> {
        match Self::find(resource) {
            Some(element) if element.has_attribute(OWNER_ATTRIBUTE) => {
                element.remove();
                Ok(())
            }
            Some(_) => Err(HeadError::Remove {
                resource: resource.to_string(),
                reason: "element was not appended by this app".to_string(),
            }),
            None => Ok(()),
        }
    }
}
