use web_sys::Document;

use rsx_client::Page;

/// The live document as a loader target.
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Page for DomPage {
    fn has_placeholder(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn inject(&self, id: &str, html: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(el) => {
                el.set_inner_html(html);
                true
            }
            None => false,
        }
    }
}
