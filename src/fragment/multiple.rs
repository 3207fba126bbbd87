use super::{AsHtml, Fragment, LinkResolver};

/// Ordered values of a repeatable field. Renders as the plain concatenation of
/// its members, without separator or wrapper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Multiple {
    fragments: Vec<Fragment>,
}
impl Multiple {
    pub fn new(fragments: Vec<Fragment>) -> Self {
        Self { fragments }
    }
    pub fn len(&self) -> usize {
        self.fragments.len()
    }
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
    pub fn get(&self, index: usize) -> Option<&Fragment> {
        self.fragments.get(index)
    }
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Fragment> {
        self.fragments.iter()
    }
}
impl AsHtml for Multiple {
    fn as_html(&self, resolver: &dyn LinkResolver) -> String {
        self.fragments.iter().map(|f| f.as_html(resolver)).collect()
    }
}
impl std::ops::Index<usize> for Multiple {
    type Output = Fragment;
    fn index(&self, index: usize) -> &Fragment {
        &self.fragments[index]
    }
}
impl FromIterator<Fragment> for Multiple {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
