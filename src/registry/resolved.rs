//! The result of one resolution: role → binding, in table order.

use std::collections::HashMap;

/// Outcome for a single role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding<H> {
    Bound(H),
    /// The token metadata registry had no entry for `symbol`.
    Unresolved { symbol: String },
}

impl<H> Binding<H> {
    pub fn handle(&self) -> Option<&H> {
        match self {
            Binding::Bound(handle) => Some(handle),
            Binding::Unresolved { .. } => None,
        }
    }

    pub fn into_handle(self) -> Option<H> {
        match self {
            Binding::Bound(handle) => Some(handle),
            Binding::Unresolved { .. } => None,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Binding::Bound(_))
    }
}

/// Role → contract handle mapping for one chain.
///
/// Every role of the selected table appears exactly once. Roles whose
/// external lookup failed are kept as [`Binding::Unresolved`] so callers can
/// test for them individually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRegistry<H> {
    chain_id: u64,
    bindings: Vec<(String, Binding<H>)>,
}

impl<H> ResolvedRegistry<H> {
    pub fn empty(chain_id: u64) -> Self {
        Self {
            chain_id,
            bindings: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, role: impl Into<String>, binding: Binding<H>) {
        self.bindings.push((role.into(), binding));
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Handle for `role`; `None` when absent or unresolved.
    pub fn get(&self, role: &str) -> Option<&H> {
        self.binding(role).and_then(Binding::handle)
    }

    pub fn binding(&self, role: &str) -> Option<&Binding<H>> {
        self.bindings
            .iter()
            .find(|(r, _)| r == role)
            .map(|(_, binding)| binding)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.binding(role).is_some()
    }

    pub fn is_unresolved(&self, role: &str) -> bool {
        matches!(self.binding(role), Some(Binding::Unresolved { .. }))
    }

    /// All roles, including unresolved ones.
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|(role, _)| role.as_str())
    }

    /// Roles that resolved to a handle.
    pub fn bound_roles(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(|(_, binding)| binding.is_bound())
            .map(|(role, _)| role.as_str())
    }

    pub fn unresolved_roles(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .filter(|(_, binding)| !binding.is_bound())
            .map(|(role, _)| role.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding<H>)> {
        self.bindings.iter().map(|(role, binding)| (role.as_str(), binding))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Merge into a caller namespace. Unresolved roles become `None`;
    /// existing keys with the same name are overwritten.
    pub fn merge_into(self, namespace: &mut HashMap<String, Option<H>>) {
        for (role, binding) in self.bindings {
            namespace.insert(role, binding.into_handle());
        }
    }
}

impl<H> IntoIterator for ResolvedRegistry<H> {
    type Item = (String, Binding<H>);
    type IntoIter = std::vec::IntoIter<(String, Binding<H>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ResolvedRegistry<u32> {
        let mut registry = ResolvedRegistry::empty(1);
        registry.push("token", Binding::Unresolved { symbol: "OGN".to_string() });
        registry.push("vault", Binding::Bound(7));
        registry.push("series", Binding::Bound(8));
        registry
    }

    #[test]
    fn test_lookup() {
        let registry = sample();
        assert_eq!(registry.chain_id(), 1);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("vault"), Some(&7));
        assert_eq!(registry.get("token"), None);
        assert!(registry.contains("token"));
        assert!(registry.is_unresolved("token"));
        assert!(!registry.is_unresolved("vault"));
        assert!(!registry.contains("season_one"));
    }

    #[test]
    fn test_role_views_keep_order() {
        let registry = sample();
        assert_eq!(registry.roles().collect::<Vec<_>>(), ["token", "vault", "series"]);
        assert_eq!(registry.bound_roles().collect::<Vec<_>>(), ["vault", "series"]);
        assert_eq!(registry.unresolved_roles().collect::<Vec<_>>(), ["token"]);
    }

    #[test]
    fn test_merge_into_namespace() {
        let mut namespace: HashMap<String, Option<u32>> = HashMap::new();
        namespace.insert("vault".to_string(), Some(1));
        namespace.insert("web3".to_string(), Some(0));

        sample().merge_into(&mut namespace);

        assert_eq!(namespace.len(), 4);
        assert_eq!(namespace["vault"], Some(7));
        assert_eq!(namespace["token"], None);
        assert_eq!(namespace["web3"], Some(0));
    }

    #[test]
    fn test_empty() {
        let registry: ResolvedRegistry<u32> = ResolvedRegistry::empty(999);
        assert!(registry.is_empty());
        assert_eq!(registry.roles().count(), 0);
    }
}
