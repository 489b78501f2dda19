use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagId {
    scope: &'static str,
    name: Arc<str>,
}

pub trait HasTag {
    fn tag(&self) -> &TagId;
}

pub const STAGE_TAG_SCOPE: &str = "stage";
pub const WORKER_TAG_SCOPE: &str = "worker";
pub const COLLECTOR_TAG_SCOPE: &str = "collector";

impl TagId {
    pub fn new(scope: &'static str, name: impl Into<Arc<str>>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }

    pub fn stage() -> Self {
        Self::new(STAGE_TAG_SCOPE, "stage")
    }

    pub fn worker(index: usize) -> Self {
        Self::new(WORKER_TAG_SCOPE, format!("worker-{}", index))
    }

    pub fn collector() -> Self {
        Self::new(COLLECTOR_TAG_SCOPE, "collector")
    }

    pub fn scope(&self) -> &'static str {
        self.scope
    }

    #[cfg(test)]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for TagId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worker_tags_are_distinct() {
        let a = TagId::worker(0);
        let b = TagId::worker(1);

        assert_ne!(a, b);
        assert_eq!(a.scope(), WORKER_TAG_SCOPE);
        assert_eq!(a.to_string(), "worker-0");
    }

    #[test]
    fn test_fixed_tags() {
        assert_eq!(TagId::stage().name(), "stage");
        assert_eq!(TagId::collector().scope(), COLLECTOR_TAG_SCOPE);
    }
}
