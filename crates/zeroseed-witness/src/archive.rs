//! Persistence seam for nodes and audit records

use tokio::sync::Mutex;
use zeroseed_domain::{BatchMark, Mark, ZeroNode};

/// Trait for persisting graph state and its audit trail
///
/// Implemented by the infrastructure layer. The interface is
/// deliberately narrow: nodes, marks, and batch marks are the only
/// durable shapes. Edges travel inside the marks that witnessed them,
/// so the audit trail is sufficient to rebuild the graph.
#[async_trait::async_trait]
pub trait Archive: Send + Sync {
    /// Error type for persistence operations
    type Error: std::fmt::Display + Send;

    /// Persist one node (upsert)
    async fn save_node(&self, node: &ZeroNode) -> Result<(), Self::Error>;

    /// Persist one mark
    async fn save_mark(&self, mark: &Mark) -> Result<(), Self::Error>;

    /// Persist one batch of marks
    async fn save_batch_mark(&self, batch: &BatchMark) -> Result<(), Self::Error>;
}

#[derive(Debug, Default)]
struct MemoryArchiveState {
    nodes: Vec<ZeroNode>,
    marks: Vec<Mark>,
    batches: Vec<BatchMark>,
    fail_next: u32,
}

/// In-memory reference archive
///
/// Keeps everything in vectors, in arrival order. `fail_next` lets
/// tests inject persistence failures to exercise retry and
/// buffer-intact behavior.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    state: Mutex<MemoryArchiveState>,
}

impl MemoryArchive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` save calls fail
    pub async fn fail_next(&self, count: u32) {
        self.state.lock().await.fail_next = count;
    }

    /// Number of nodes saved
    pub async fn node_count(&self) -> usize {
        self.state.lock().await.nodes.len()
    }

    /// Number of individually saved marks
    pub async fn mark_count(&self) -> usize {
        self.state.lock().await.marks.len()
    }

    /// Number of batches saved
    pub async fn batch_count(&self) -> usize {
        self.state.lock().await.batches.len()
    }

    /// Snapshot of the saved nodes
    pub async fn nodes(&self) -> Vec<ZeroNode> {
        self.state.lock().await.nodes.clone()
    }

    /// Snapshot of the individually saved marks
    pub async fn marks(&self) -> Vec<Mark> {
        self.state.lock().await.marks.clone()
    }

    /// Snapshot of the saved batches
    pub async fn batches(&self) -> Vec<BatchMark> {
        self.state.lock().await.batches.clone()
    }

    fn take_failure(state: &mut MemoryArchiveState) -> Result<(), String> {
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err("injected archive failure".to_string());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl Archive for MemoryArchive {
    type Error = String;

    async fn save_node(&self, node: &ZeroNode) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        Self::take_failure(&mut state)?;
        // Upsert by id
        if let Some(existing) = state.nodes.iter_mut().find(|n| n.id == node.id) {
            *existing = node.clone();
        } else {
            state.nodes.push(node.clone());
        }
        Ok(())
    }

    async fn save_mark(&self, mark: &Mark) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        Self::take_failure(&mut state)?;
        state.marks.push(mark.clone());
        Ok(())
    }

    async fn save_batch_mark(&self, batch: &BatchMark) -> Result<(), Self::Error> {
        let mut state = self.state.lock().await;
        Self::take_failure(&mut state)?;
        state.batches.push(batch.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeroseed_domain::{Layer, NodeKind, UmweltSnapshot};

    fn mark(response: &str) -> Mark {
        Mark::new("test", "stimulus", response, UmweltSnapshot::empty())
    }

    #[tokio::test]
    async fn test_save_and_count() {
        let archive = MemoryArchive::new();

        let node = ZeroNode::new(Layer::new(2).unwrap(), NodeKind::Principle, "t", "b");
        archive.save_node(&node).await.unwrap();
        archive.save_mark(&mark("a")).await.unwrap();

        assert_eq!(archive.node_count().await, 1);
        assert_eq!(archive.mark_count().await, 1);
        assert_eq!(archive.batch_count().await, 0);
    }

    #[tokio::test]
    async fn test_node_save_is_upsert() {
        let archive = MemoryArchive::new();
        let mut node = ZeroNode::new(Layer::new(2).unwrap(), NodeKind::Principle, "old", "b");
        archive.save_node(&node).await.unwrap();

        node.title = "new".to_string();
        archive.save_node(&node).await.unwrap();

        let nodes = archive.nodes().await;
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].title, "new");
    }

    #[tokio::test]
    async fn test_failure_injection_is_consumed() {
        let archive = MemoryArchive::new();
        archive.fail_next(2).await;

        assert!(archive.save_mark(&mark("a")).await.is_err());
        assert!(archive.save_mark(&mark("b")).await.is_err());
        assert!(archive.save_mark(&mark("c")).await.is_ok());

        assert_eq!(archive.mark_count().await, 1);
    }

    #[tokio::test]
    async fn test_batch_preserved_verbatim() {
        let archive = MemoryArchive::new();
        let batch = BatchMark::from_marks("test", vec![mark("a"), mark("b")]).unwrap();

        archive.save_batch_mark(&batch).await.unwrap();

        let saved = archive.batches().await;
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0], batch);
    }
}
