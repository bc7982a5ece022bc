//! Dual-approval workflow for stock replenishment requests.
//!
//! Each request order carries two independent approval fields, admin and
//! warehouse, each set at most once. The warehouse may only act once the
//! admin field is `approved`. Local state is mutated only after the server
//! accepts the decision, so a failed call leaves the list exactly as it was.

use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::api::types::{ApprovalStatus, RequestOrder};
use crate::api::{ApiError, Gateway};

/// An actor's decision on one approval field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn status(self) -> ApprovalStatus {
        match self {
            Decision::Approve => ApprovalStatus::Approved,
            Decision::Reject => ApprovalStatus::Rejected,
        }
    }
}

/// Apply a decision to one approval field. Approval fields are write-once:
/// anything but `Pending` is terminal.
pub fn transition(current: ApprovalStatus, decision: Decision) -> Option<ApprovalStatus> {
    current.is_pending().then(|| decision.status())
}

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("request order {0} not found")]
    NotFound(u64),

    #[error("request order {id} already has {stage} approval \"{status}\"")]
    AlreadyDecided {
        id: u64,
        stage: &'static str,
        status: ApprovalStatus,
    },

    #[error("request order {0} has not been approved by an admin")]
    NotAdminApproved(u64),

    #[error(transparent)]
    Gateway(#[from] ApiError),
}

/// View-state partition of the request list. Classification is by
/// precedence, so every request lands in exactly one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Queue {
    /// Awaiting the admin decision.
    PendingAdmin,
    /// Admin approved, warehouse still pending.
    ReadyForWarehouse,
    /// Admin rejected; warehouse action is moot.
    RejectedByAdmin,
    /// The warehouse has decided, one way or the other.
    Processed,
}

impl Queue {
    pub fn of(order: &RequestOrder) -> Queue {
        if !order.warehouse_approval.is_pending() {
            return Queue::Processed;
        }
        match order.admin_approval {
            ApprovalStatus::Pending => Queue::PendingAdmin,
            ApprovalStatus::Approved => Queue::ReadyForWarehouse,
            ApprovalStatus::Rejected => Queue::RejectedByAdmin,
        }
    }
}

/// A request is actionable by the warehouse iff the admin approved it and
/// the warehouse has not decided yet.
pub fn is_ready_for_warehouse(order: &RequestOrder) -> bool {
    order.admin_approval == ApprovalStatus::Approved && order.warehouse_approval.is_pending()
}

/// Advisory stock check: fulfilling should be disabled when the product's
/// known stock is below the requested quantity. Purely a UX guard; the
/// server remains the source of truth, so an order without an embedded
/// product is not blocked here.
pub fn can_fulfill(order: &RequestOrder) -> bool {
    order
        .product
        .as_ref()
        .map(|p| p.quantity >= order.quantity)
        .unwrap_or(true)
}

/// Holds the fetched request list and applies decisions against it.
/// Both the admin and the warehouse console are views over this.
pub struct RequestOrderConsole {
    gateway: Arc<dyn Gateway>,
    orders: Vec<RequestOrder>,
}

impl RequestOrderConsole {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            orders: Vec::new(),
        }
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.orders = self.gateway.request_orders().await?;
        Ok(())
    }

    pub fn orders(&self) -> &[RequestOrder] {
        &self.orders
    }

    pub fn order(&self, id: u64) -> Option<&RequestOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn in_queue(&self, queue: Queue) -> Vec<&RequestOrder> {
        self.orders.iter().filter(|o| Queue::of(o) == queue).collect()
    }

    /// Record the admin decision. Only the admin field changes, and only
    /// after the server accepted the call.
    pub async fn admin_decision(
        &mut self,
        id: u64,
        decision: Decision,
    ) -> Result<(), WorkflowError> {
        let order = self.order(id).ok_or(WorkflowError::NotFound(id))?;
        let status = transition(order.admin_approval, decision).ok_or(
            WorkflowError::AlreadyDecided {
                id,
                stage: "admin",
                status: order.admin_approval,
            },
        )?;

        self.gateway.admin_approval(id, status).await?;

        if let Some(order) = self.orders.iter_mut().find(|o| o.id == id) {
            order.admin_approval = status;
        }
        info!(id, status = %status, "Recorded admin decision");
        Ok(())
    }

    /// Record the warehouse decision. Requires prior admin approval; only
    /// the warehouse field changes, and only after the server accepted.
    pub async fn warehouse_decision(
        &mut self,
        id: u64,
        decision: Decision,
    ) -> Result<(), WorkflowError> {
        let order = self.order(id).ok_or(WorkflowError::NotFound(id))?;
        if order.admin_approval != ApprovalStatus::Approved {
            return Err(WorkflowError::NotAdminApproved(id));
        }
        let status = transition(order.warehouse_approval, decision).ok_or(
            WorkflowError::AlreadyDecided {
                id,
                stage: "warehouse",
                status: order.warehouse_approval,
            },
        )?;

        self.gateway.warehouse_approval(id, status).await?;

        if let Some(order) = self.orders.iter_mut().find(|o| o.id == id) {
            order.warehouse_approval = status;
        }
        info!(id, status = %status, "Recorded warehouse decision");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{network, test_request_order, MockGateway};
    use crate::api::types::ApprovalStatus::{Approved, Pending, Rejected};
    use std::sync::atomic::Ordering;

    fn console(orders: Vec<RequestOrder>) -> (Arc<MockGateway>, RequestOrderConsole) {
        let gateway = Arc::new(MockGateway::new().with_orders(orders));
        let console = RequestOrderConsole::new(gateway.clone() as Arc<dyn Gateway>);
        (gateway, console)
    }

    #[test]
    fn test_transition_only_from_pending() {
        assert_eq!(transition(Pending, Decision::Approve), Some(Approved));
        assert_eq!(transition(Pending, Decision::Reject), Some(Rejected));
        assert_eq!(transition(Approved, Decision::Reject), None);
        assert_eq!(transition(Rejected, Decision::Approve), None);
    }

    #[test]
    fn test_queue_classification() {
        assert_eq!(
            Queue::of(&test_request_order(1, Pending, Pending, 1, 10)),
            Queue::PendingAdmin
        );
        assert_eq!(
            Queue::of(&test_request_order(2, Approved, Pending, 1, 10)),
            Queue::ReadyForWarehouse
        );
        assert_eq!(
            Queue::of(&test_request_order(3, Rejected, Pending, 1, 10)),
            Queue::RejectedByAdmin
        );
        assert_eq!(
            Queue::of(&test_request_order(4, Approved, Approved, 1, 10)),
            Queue::Processed
        );
        assert_eq!(
            Queue::of(&test_request_order(5, Approved, Rejected, 1, 10)),
            Queue::Processed
        );
    }

    #[test]
    fn test_pending_admin_is_never_ready_for_warehouse() {
        let order = test_request_order(1, Pending, Pending, 1, 10);
        assert!(!is_ready_for_warehouse(&order));
        assert_ne!(Queue::of(&order), Queue::ReadyForWarehouse);
    }

    #[test]
    fn test_advisory_stock_check() {
        // Request #42: stock 3, requested 5 -> fulfilling is disabled
        let short = test_request_order(42, Approved, Pending, 5, 3);
        assert!(!can_fulfill(&short));

        let covered = test_request_order(43, Approved, Pending, 5, 5);
        assert!(can_fulfill(&covered));

        // No embedded product: nothing to check against, leave it to the server
        let mut unknown = test_request_order(44, Approved, Pending, 5, 0);
        unknown.product = None;
        assert!(can_fulfill(&unknown));
    }

    #[tokio::test]
    async fn test_admin_approval_moves_request_to_warehouse_queue() {
        let (_, mut console) =
            console(vec![test_request_order(1, Pending, Pending, 2, 10)]);
        console.refresh().await.unwrap();
        assert_eq!(console.in_queue(Queue::PendingAdmin).len(), 1);

        console.admin_decision(1, Decision::Approve).await.unwrap();

        let order = console.order(1).unwrap();
        assert_eq!(order.admin_approval, Approved);
        // The warehouse field is untouched
        assert_eq!(order.warehouse_approval, Pending);
        assert!(console.in_queue(Queue::PendingAdmin).is_empty());
        assert_eq!(console.in_queue(Queue::ReadyForWarehouse).len(), 1);
    }

    #[tokio::test]
    async fn test_warehouse_decision_touches_only_its_own_field() {
        let (_, mut console) =
            console(vec![test_request_order(1, Approved, Pending, 2, 10)]);
        console.refresh().await.unwrap();

        console
            .warehouse_decision(1, Decision::Reject)
            .await
            .unwrap();

        let order = console.order(1).unwrap();
        assert_eq!(order.admin_approval, Approved);
        assert_eq!(order.warehouse_approval, Rejected);
        assert_eq!(Queue::of(order), Queue::Processed);
    }

    #[tokio::test]
    async fn test_failed_decision_leaves_state_unchanged() {
        let (gateway, mut console) =
            console(vec![test_request_order(1, Pending, Pending, 2, 10)]);
        console.refresh().await.unwrap();
        *gateway.admin_error.lock() = Some(network());

        let err = console.admin_decision(1, Decision::Approve).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Gateway(_)));

        let order = console.order(1).unwrap();
        assert_eq!(order.admin_approval, Pending);
        assert_eq!(order.warehouse_approval, Pending);
    }

    #[tokio::test]
    async fn test_second_admin_decision_is_rejected_locally() {
        let (gateway, mut console) =
            console(vec![test_request_order(1, Approved, Pending, 2, 10)]);
        console.refresh().await.unwrap();

        let err = console.admin_decision(1, Decision::Reject).await.unwrap_err();

        assert!(matches!(
            err,
            WorkflowError::AlreadyDecided { stage: "admin", .. }
        ));
        // Terminal state: the server was never called
        assert_eq!(gateway.admin_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_warehouse_cannot_act_before_admin_approval() {
        let (gateway, mut console) = console(vec![
            test_request_order(1, Pending, Pending, 2, 10),
            test_request_order(2, Rejected, Pending, 2, 10),
        ]);
        console.refresh().await.unwrap();

        for id in [1, 2] {
            let err = console
                .warehouse_decision(id, Decision::Approve)
                .await
                .unwrap_err();
            assert!(matches!(err, WorkflowError::NotAdminApproved(_)));
        }
        assert_eq!(gateway.warehouse_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_request_id() {
        let (_, mut console) = console(vec![]);
        console.refresh().await.unwrap();

        let err = console.admin_decision(7, Decision::Approve).await.unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound(7)));
    }
}
