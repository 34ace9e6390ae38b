/// One product listed in a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub link: Option<String>,
}

impl ItemRecord {
    /// Authors joined the way both report renderings print them.
    pub fn authors_joined(&self) -> Option<String> {
        if self.authors.is_empty() {
            None
        } else {
            Some(self.authors.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_authors_with_commas() {
        let rec = ItemRecord {
            title: "Widget".into(),
            authors: vec!["Acme".into(), "Initech".into()],
            link: None,
        };
        assert_eq!(rec.authors_joined().as_deref(), Some("Acme, Initech"));
    }

    #[test]
    fn no_authors_means_no_suffix() {
        let rec = ItemRecord {
            title: "Widget".into(),
            authors: vec![],
            link: None,
        };
        assert!(rec.authors_joined().is_none());
    }
}
