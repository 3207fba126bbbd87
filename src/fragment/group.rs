use super::{render_sections, AsHtml, Fragment, LinkResolver};

/// One entry of a group: named fragments in the order they were sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupItem {
    fragments: Vec<(String, Fragment)>,
}
impl GroupItem {
    pub fn new(fragments: Vec<(String, Fragment)>) -> Self {
        Self { fragments }
    }
    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.fragments
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, fragment)| fragment)
    }
    pub fn fragments(&self) -> &[(String, Fragment)] {
        &self.fragments
    }
}
impl AsHtml for GroupItem {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        render_sections(&self.fragments, resolver)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    items: Vec<GroupItem>,
}
impl Group {
    pub fn new(items: Vec<GroupItem>) -> Self {
        Self { items }
    }
    pub fn len(&self) -> usize {
        self.items.len()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&GroupItem> {
        self.items.get(index)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, GroupItem> {
        self.items.iter()
    }
}
impl AsHtml for Group {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        self.items
            .iter()
            .map(|item| item.as_html(resolver))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
