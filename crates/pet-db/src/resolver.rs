//! Tree resolver: one node id in, one hydrated node out.
//!
//! The resolver never follows `next_action_id` itself. Clients walk the
//! graph one node per call, so authored cycles cannot loop here.

use pet_core::entities::ActionableNode;
use pet_core::enums::NodeKind;
use pet_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::service::PetService;

impl PetService {
    /// Resolve a node id into its hydrated variant.
    ///
    /// Only the literal tag `"Question"` yields a question node; any other
    /// tag, including NULL, yields a result node.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if no node has this id, or
    /// `DatabaseError` if a query fails.
    pub async fn resolve_actionable(&self, id: i64) -> Result<ActionableNode, DatabaseError> {
        let kind = self
            .fetch_node_variant(id)
            .await?
            .ok_or_else(|| CoreError::not_found("actionable", id))?;
        tracing::debug!(node_id = id, %kind, "resolving node");

        match kind {
            NodeKind::Question => Ok(ActionableNode::Question(
                self.fetch_question_node(id).await?,
            )),
            NodeKind::Result => Ok(ActionableNode::Result(self.fetch_result_node(id).await?)),
        }
    }
}
