//! Customer Orchestration Service
//!
//! Operations that need more than one API call. Each step's input is taken
//! from the previous step's response; nothing is cached between calls.
//! A failed step stops the chain and its error is returned unchanged.
//! Nothing is rolled back.

use std::collections::HashSet;

use futures::future::join_all;
use payments_types::{
    CardId, Customer, CustomerAccessor, CustomerId, CustomerRequest, GatewayError, Order,
    PaginationParams, ScheduleAccessor, ScheduleId,
};
use tracing::{debug, info, warn};

use crate::report::{DestroySchedulesReport, FailedDeletion};

/// Page size used when collecting a customer's schedules.
pub const SCHEDULE_PAGE_LIMIT: u32 = 100;

/// Page size used when the embedded card list of a customer is incomplete.
pub const CARD_PAGE_LIMIT: u32 = 100;

/// Application service for multi-step customer operations.
///
/// Receives exactly the accessors it calls:
/// - `C: CustomerAccessor` for customer reads, updates and schedule listing
/// - `S: ScheduleAccessor` for schedule deletion
///
/// Both are injected at compile time, so tests can use in-memory fakes.
pub struct CustomerService<C, S> {
    customers: C,
    schedules: S,
}

impl<C, S> CustomerService<C, S> {
    /// Creates a new service over the given accessors.
    pub fn new(customers: C, schedules: S) -> Self {
        Self {
            customers,
            schedules,
        }
    }
}

impl<C: CustomerAccessor, S> CustomerService<C, S> {
    /// Attaches the card behind `card_token` to the customer and makes it the
    /// default card.
    ///
    /// The new card is the one present after the attach but not before it.
    /// When the customer embeds only part of its cards, the rest are read
    /// from the card listing. If no unseen card shows up the operation fails
    /// with `InvalidResponse` and the default card is left unchanged.
    ///
    /// Not atomic: when the final update fails the card stays attached but
    /// the default is unchanged.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn add_card_as_default(
        &self,
        customer_id: &CustomerId,
        card_token: &str,
    ) -> Result<Customer, GatewayError> {
        ensure_customer_id(customer_id)?;

        let before = self.customers.retrieve_customer(customer_id).await?;
        let known: HashSet<CardId> = self.card_ids(&before).await?.into_iter().collect();
        debug!(cards = known.len(), "attaching card");

        let updated = self
            .customers
            .update_customer(customer_id, CustomerRequest::add_card(card_token))
            .await?;
        let after = self.card_ids(&updated).await?;
        let card_id = select_new_card(&known, &after)?;
        debug!(card_id = %card_id, "setting default card");

        let customer = self
            .customers
            .update_customer(customer_id, CustomerRequest::set_default_card(card_id))
            .await?;
        info!(
            default_card = customer.default_card.as_ref().map(CardId::as_str),
            cards = customer.cards.len(),
            "card added as default"
        );
        Ok(customer)
    }

    /// Ids of all the customer's cards in listing order.
    ///
    /// Uses the embedded card list when it is complete and pages through
    /// the card listing otherwise.
    async fn card_ids(&self, customer: &Customer) -> Result<Vec<CardId>, GatewayError> {
        let embedded = &customer.cards;
        let truncated = embedded
            .total
            .is_some_and(|total| total > embedded.len() as u64);
        if !truncated {
            return Ok(embedded.iter().map(|card| card.id.clone()).collect());
        }

        debug!(
            embedded = embedded.len(),
            total = embedded.total,
            "embedded card list is incomplete; listing cards"
        );
        let mut params = PaginationParams::new()
            .order(Order::Chronological)
            .limit(CARD_PAGE_LIMIT);
        let mut ids = Vec::new();
        loop {
            let page = self
                .customers
                .list_customer_cards(&customer.id, params.clone())
                .await?;
            ids.extend(page.iter().map(|card| card.id.clone()));

            let Some(next) = page.next_page(&params) else {
                break;
            };
            if !advances(&params, &next) {
                warn!("card listing did not advance; stopping");
                break;
            }
            params = next;
        }
        Ok(ids)
    }

    /// Ids of the customer's active schedules, newest first.
    ///
    /// Follows the pages of the listing until the service reports no more,
    /// so the result does not depend on the service's maximum page size.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn active_schedule_ids(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<ScheduleId>, GatewayError> {
        ensure_customer_id(customer_id)?;

        let mut params = PaginationParams::new()
            .order(Order::ReverseChronological)
            .limit(SCHEDULE_PAGE_LIMIT);
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        let mut pages = 0usize;

        loop {
            let page = self
                .customers
                .list_customer_schedules(customer_id, params.clone())
                .await?;
            pages += 1;

            for schedule in page.iter().filter(|schedule| schedule.active) {
                if seen.insert(schedule.id.clone()) {
                    ids.push(schedule.id.clone());
                }
            }

            let Some(next) = page.next_page(&params) else {
                break;
            };
            if !advances(&params, &next) {
                warn!(
                    offset = params.offset.unwrap_or(0),
                    "schedule listing did not advance; stopping"
                );
                break;
            }
            params = next;
        }

        debug!(pages, active = ids.len(), "collected active schedules");
        Ok(ids)
    }
}

impl<C: CustomerAccessor, S: ScheduleAccessor> CustomerService<C, S> {
    /// Deletes every active schedule of the customer.
    ///
    /// Inactive schedules are left alone. Deletions are issued concurrently
    /// and all of them are awaited; the report lists which ids were deleted
    /// and which failed. A listing failure is returned as an error before
    /// any deletion is issued.
    #[tracing::instrument(skip_all, fields(customer_id = %customer_id))]
    pub async fn destroy_active_schedules(
        &self,
        customer_id: &CustomerId,
    ) -> Result<DestroySchedulesReport, GatewayError> {
        let ids = self.active_schedule_ids(customer_id).await?;
        if ids.is_empty() {
            info!("no active schedules");
            return Ok(DestroySchedulesReport::default());
        }

        let results = join_all(ids.into_iter().map(|id| async move {
            let result = self.schedules.destroy_schedule(&id).await;
            (id, result)
        }))
        .await;

        let mut report = DestroySchedulesReport::default();
        for (id, result) in results {
            match result {
                Ok(resp) if resp.deleted => report.deleted.push(id),
                Ok(_) => {
                    warn!(schedule_id = %id, "schedule not deleted");
                    report.failed.push(FailedDeletion {
                        id,
                        error: GatewayError::InvalidResponse("schedule was not deleted".into()),
                    });
                }
                Err(error) => {
                    warn!(schedule_id = %id, %error, "failed to delete schedule");
                    report.failed.push(FailedDeletion { id, error });
                }
            }
        }

        info!(
            deleted = report.deleted.len(),
            failed = report.failed.len(),
            outcome = ?report.outcome(),
            "destroyed active schedules"
        );
        Ok(report)
    }
}

fn ensure_customer_id(customer_id: &CustomerId) -> Result<(), GatewayError> {
    if customer_id.is_blank() {
        return Err(GatewayError::InvalidRequest(
            "customer id cannot be empty".into(),
        ));
    }
    Ok(())
}

fn advances(current: &PaginationParams, next: &PaginationParams) -> bool {
    next.offset.unwrap_or(0) > current.offset.unwrap_or(0)
}

/// Picks the card that the attach step added.
fn select_new_card(known: &HashSet<CardId>, after: &[CardId]) -> Result<CardId, GatewayError> {
    let added: Vec<&CardId> = after.iter().filter(|id| !known.contains(*id)).collect();

    match added.as_slice() {
        [id] => Ok((*id).clone()),
        [.., last] => {
            warn!(count = added.len(), "several new cards; using the last one");
            Ok((*last).clone())
        }
        [] => Err(GatewayError::InvalidResponse(
            "no new card found on the customer after adding a card".into(),
        )),
    }
}
