//! CustomerService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Barrier;

    use payments_types::{
        Card, CardId, Customer, CustomerAccessor, CustomerId, CustomerRequest, DestroyResponse,
        GatewayError, List, Order, PaginationParams, Schedule, ScheduleAccessor, ScheduleId,
        ScheduleStatus,
    };

    use crate::{CARD_PAGE_LIMIT, CustomerService, DestroyOutcome, SCHEDULE_PAGE_LIMIT};

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Retrieve,
        AddCard(String),
        SetDefault(CardId),
        List(PaginationParams),
        ListCards(PaginationParams),
        Destroy(ScheduleId),
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub enum Failure {
        Retrieve,
        AddCard,
        SetDefault,
        List,
        Destroy(ScheduleId),
    }

    #[derive(Default)]
    struct State {
        customers: HashMap<CustomerId, Customer>,
        /// Schedules in creation order, oldest first.
        schedules: Vec<(CustomerId, Schedule)>,
        next_card: u32,
        calls: Vec<Call>,
        failures: HashSet<Failure>,
        reverse_cards: bool,
        max_page_size: Option<u32>,
        report_total: bool,
        ignore_offset: bool,
        embedded_card_limit: Option<usize>,
        drop_added_cards: bool,
        destroy_barrier: Option<Arc<Barrier>>,
    }

    impl State {
        /// The customer as the API would return it, with the embedded card
        /// list capped and the total left at the full count.
        fn response(&self, id: &CustomerId) -> Result<Customer, GatewayError> {
            let mut customer = self.customers.get(id).cloned().ok_or_else(|| not_found(id))?;
            if self.reverse_cards {
                customer.cards.data.reverse();
            }
            if let Some(limit) = self.embedded_card_limit {
                customer.cards.data.truncate(limit);
                customer.cards.limit = Some(limit as u32);
            }
            Ok(customer)
        }
    }

    /// In-memory stand-in for the customer and schedule endpoints.
    ///
    /// Clones share state, so one instance can be injected as both accessors.
    #[derive(Clone, Default)]
    pub struct MockApi {
        state: Arc<Mutex<State>>,
    }

    fn injected(failure: &Failure) -> GatewayError {
        GatewayError::api(500, "internal_error", format!("injected failure: {failure:?}"))
    }

    impl MockApi {
        pub fn new() -> Self {
            let api = Self::default();
            api.state.lock().unwrap().report_total = true;
            api
        }

        pub fn with_customer(self, id: &str, cards: &[&str], default_card: Option<&str>) -> Self {
            let mut customer = Customer::new(id);
            customer.cards = List::from_vec(cards.iter().map(|c| Card::new(*c)).collect());
            customer.default_card = default_card.map(CardId::from);
            {
                let mut state = self.state.lock().unwrap();
                state.next_card += cards.len() as u32;
                state.customers.insert(customer.id.clone(), customer);
            }
            self
        }

        pub fn with_schedules(self, customer: &str, schedules: &[(&str, bool)]) -> Self {
            {
                let mut state = self.state.lock().unwrap();
                for (id, active) in schedules {
                    state
                        .schedules
                        .push((CustomerId::from(customer), Schedule::new(*id, *active)));
                }
            }
            self
        }

        pub fn failing(self, failure: Failure) -> Self {
            self.state.lock().unwrap().failures.insert(failure);
            self
        }

        pub fn reversing_cards(self) -> Self {
            self.state.lock().unwrap().reverse_cards = true;
            self
        }

        pub fn with_max_page_size(self, size: u32, report_total: bool) -> Self {
            {
                let mut state = self.state.lock().unwrap();
                state.max_page_size = Some(size);
                state.report_total = report_total;
            }
            self
        }

        pub fn ignoring_offset(self) -> Self {
            self.state.lock().unwrap().ignore_offset = true;
            self
        }

        pub fn with_embedded_card_limit(self, limit: usize) -> Self {
            self.state.lock().unwrap().embedded_card_limit = Some(limit);
            self
        }

        /// Attach requests succeed without adding a card.
        pub fn dropping_added_cards(self) -> Self {
            self.state.lock().unwrap().drop_added_cards = true;
            self
        }

        /// Deletions block until `count` of them are in flight at once.
        pub fn with_destroy_barrier(self, count: usize) -> Self {
            self.state.lock().unwrap().destroy_barrier = Some(Arc::new(Barrier::new(count)));
            self
        }

        pub fn calls(&self) -> Vec<Call> {
            self.state.lock().unwrap().calls.clone()
        }

        pub fn destroyed(&self) -> Vec<ScheduleId> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::Destroy(id) => Some(id),
                    _ => None,
                })
                .collect()
        }

        pub fn list_calls(&self) -> Vec<PaginationParams> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    Call::List(params) => Some(params),
                    _ => None,
                })
                .collect()
        }

        pub fn customer(&self, id: &str) -> Customer {
            self.state.lock().unwrap().customers[&CustomerId::from(id)].clone()
        }

        pub fn service(&self) -> CustomerService<MockApi, MockApi> {
            CustomerService::new(self.clone(), self.clone())
        }
    }

    fn not_found(id: &CustomerId) -> GatewayError {
        GatewayError::api(404, "not_found", format!("customer {id} was not found"))
    }

    #[async_trait]
    impl CustomerAccessor for MockApi {
        async fn retrieve_customer(&self, id: &CustomerId) -> Result<Customer, GatewayError> {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Retrieve);
            if state.failures.contains(&Failure::Retrieve) {
                return Err(injected(&Failure::Retrieve));
            }
            state.response(id)
        }

        async fn update_customer(
            &self,
            id: &CustomerId,
            req: CustomerRequest,
        ) -> Result<Customer, GatewayError> {
            let mut state = self.state.lock().unwrap();
            let state = &mut *state;

            if let Some(token) = req.card {
                state.calls.push(Call::AddCard(token));
                if state.failures.contains(&Failure::AddCard) {
                    return Err(injected(&Failure::AddCard));
                }
                if !state.drop_added_cards {
                    state.next_card += 1;
                    let card = Card::new(format!("card_{}", state.next_card));
                    let customer = state.customers.get_mut(id).ok_or_else(|| not_found(id))?;
                    customer.cards.data.push(card);
                    customer.cards.total = Some(customer.cards.len() as u64);
                }
            }

            if let Some(card_id) = req.default_card {
                state.calls.push(Call::SetDefault(card_id.clone()));
                if state.failures.contains(&Failure::SetDefault) {
                    return Err(injected(&Failure::SetDefault));
                }
                let customer = state.customers.get_mut(id).ok_or_else(|| not_found(id))?;
                if customer.card(&card_id).is_none() {
                    return Err(GatewayError::api(400, "invalid_card", "card not found"));
                }
                customer.default_card = Some(card_id);
            }

            state.response(id)
        }

        async fn list_customer_cards(
            &self,
            id: &CustomerId,
            params: PaginationParams,
        ) -> Result<List<Card>, GatewayError> {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::ListCards(params.clone()));
            let customer = state.customers.get(id).ok_or_else(|| not_found(id))?;

            let limit = params.limit.unwrap_or(20);
            let offset = params.offset.unwrap_or(0);
            let data = customer
                .cards
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect();

            Ok(List {
                data,
                limit: Some(limit),
                offset: Some(offset),
                total: Some(customer.cards.len() as u64),
                order: params.order,
                ..List::default()
            })
        }

        async fn list_customer_schedules(
            &self,
            id: &CustomerId,
            params: PaginationParams,
        ) -> Result<List<Schedule>, GatewayError> {
            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::List(params.clone()));
            if state.failures.contains(&Failure::List) {
                return Err(injected(&Failure::List));
            }

            let mut all: Vec<Schedule> = state
                .schedules
                .iter()
                .filter(|(owner, _)| owner == id)
                .map(|(_, schedule)| schedule.clone())
                .collect();
            if params.order == Some(Order::ReverseChronological) {
                all.reverse();
            }

            let limit = match (params.limit, state.max_page_size) {
                (Some(requested), Some(max)) => requested.min(max),
                (Some(requested), None) => requested,
                (None, Some(max)) => max,
                (None, None) => 20,
            };
            let offset = if state.ignore_offset {
                0
            } else {
                params.offset.unwrap_or(0)
            };
            let total = all.len() as u64;
            let data = all
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect();

            Ok(List {
                data,
                limit: Some(limit),
                offset: Some(offset),
                total: state.report_total.then_some(total),
                order: params.order,
                ..List::default()
            })
        }
    }

    #[async_trait]
    impl ScheduleAccessor for MockApi {
        async fn destroy_schedule(&self, id: &ScheduleId) -> Result<DestroyResponse, GatewayError> {
            let barrier = self.state.lock().unwrap().destroy_barrier.clone();
            if let Some(barrier) = barrier {
                barrier.wait().await;
            }

            let mut state = self.state.lock().unwrap();
            state.calls.push(Call::Destroy(id.clone()));
            let failure = Failure::Destroy(id.clone());
            if state.failures.contains(&failure) {
                return Err(injected(&failure));
            }
            let (_, schedule) = state
                .schedules
                .iter_mut()
                .find(|(_, schedule)| &schedule.id == id)
                .ok_or_else(|| GatewayError::api(404, "not_found", "schedule was not found"))?;
            schedule.active = false;
            schedule.status = Some(ScheduleStatus::Deleted);
            Ok(DestroyResponse {
                id: Some(id.to_string()),
                deleted: true,
                livemode: Some(false),
            })
        }
    }

    fn ids(ids: &[&str]) -> Vec<ScheduleId> {
        ids.iter().map(|id| ScheduleId::from(*id)).collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // add_card_as_default
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_add_card_as_default_success() {
        let api = MockApi::new().with_customer("cust_1", &["card_1", "card_2"], Some("card_1"));

        let customer = api
            .service()
            .add_card_as_default(&"cust_1".into(), "tokn_test_1")
            .await
            .unwrap();

        assert_eq!(customer.cards.len(), 3);
        assert_eq!(customer.default_card, Some(customer.cards.data[2].id.clone()));
        assert_eq!(customer.default_card, Some(CardId::from("card_3")));
        assert_eq!(
            api.calls(),
            vec![
                Call::Retrieve,
                Call::AddCard("tokn_test_1".into()),
                Call::SetDefault("card_3".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_card_as_default_first_card() {
        let api = MockApi::new().with_customer("cust_1", &[], None);

        let customer = api
            .service()
            .add_card_as_default(&"cust_1".into(), "tokn_test_1")
            .await
            .unwrap();

        assert_eq!(customer.cards.len(), 1);
        assert_eq!(customer.default_card, Some(CardId::from("card_1")));
    }

    #[tokio::test]
    async fn test_default_set_failure_leaves_card_added() {
        let api = MockApi::new()
            .with_customer("cust_1", &["card_1", "card_2"], Some("card_1"))
            .failing(Failure::SetDefault);

        let result = api
            .service()
            .add_card_as_default(&"cust_1".into(), "tokn_test_1")
            .await;

        assert_eq!(result.unwrap_err(), injected(&Failure::SetDefault));
        let customer = api.customer("cust_1");
        assert_eq!(customer.cards.len(), 3);
        assert_eq!(customer.default_card, Some(CardId::from("card_1")));
    }

    #[tokio::test]
    async fn test_add_failure_skips_default_set() {
        let api = MockApi::new()
            .with_customer("cust_1", &["card_1"], Some("card_1"))
            .failing(Failure::AddCard);

        let result = api
            .service()
            .add_card_as_default(&"cust_1".into(), "tokn_test_1")
            .await;

        assert_eq!(result.unwrap_err(), injected(&Failure::AddCard));
        assert!(!api.calls().iter().any(|c| matches!(c, Call::SetDefault(_))));
        assert_eq!(api.customer("cust_1").cards.len(), 1);
    }

    #[tokio::test]
    async fn test_retrieve_failure_makes_no_changes() {
        let api = MockApi::new()
            .with_customer("cust_1", &["card_1"], Some("card_1"))
            .failing(Failure::Retrieve);

        let result = api
            .service()
            .add_card_as_default(&"cust_1".into(), "tokn_test_1")
            .await;

        assert_eq!(result.unwrap_err(), injected(&Failure::Retrieve));
        assert_eq!(api.calls(), vec![Call::Retrieve]);
    }

    #[tokio::test]
    async fn test_unknown_customer_is_not_found() {
        let api = MockApi::new();

        let err = api
            .service()
            .add_card_as_default(&"cust_missing".into(), "tokn_test_1")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_new_card_found_when_api_reorders_cards() {
        let api = MockApi::new()
            .with_customer("cust_1", &["card_1", "card_2"], Some("card_1"))
            .reversing_cards();

        let customer = api
            .service()
            .add_card_as_default(&"cust_1".into(), "tokn_test_1")
            .await
            .unwrap();

        // The new card comes first in the reversed list, not last.
        assert_eq!(customer.cards.data[0].id, CardId::from("card_3"));
        assert_eq!(customer.default_card, Some(CardId::from("card_3")));
    }

    #[tokio::test]
    async fn test_new_card_found_beyond_embedded_card_page() {
        // The customer embeds at most two cards, so the added card_3 is only
        // visible through the card listing.
        let api = MockApi::new()
            .with_customer("cust_1", &["card_1", "card_2"], Some("card_1"))
            .with_embedded_card_limit(2);

        let customer = api
            .service()
            .add_card_as_default(&"cust_1".into(), "tokn_test_1")
            .await
            .unwrap();

        assert_eq!(customer.default_card, Some(CardId::from("card_3")));
        assert_eq!(
            api.customer("cust_1").default_card,
            Some(CardId::from("card_3"))
        );
        assert_eq!(
            api.calls(),
            vec![
                Call::Retrieve,
                Call::AddCard("tokn_test_1".into()),
                Call::ListCards(
                    PaginationParams::new()
                        .order(Order::Chronological)
                        .limit(CARD_PAGE_LIMIT)
                ),
                Call::SetDefault("card_3".into()),
            ]
        );
    }

    #[tokio::test]
    async fn test_no_new_card_leaves_default_unchanged() {
        let api = MockApi::new()
            .with_customer("cust_1", &["card_1", "card_2"], Some("card_1"))
            .dropping_added_cards();

        let err = api
            .service()
            .add_card_as_default(&"cust_1".into(), "tokn_test_1")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
        assert!(!api.calls().iter().any(|c| matches!(c, Call::SetDefault(_))));
        assert_eq!(
            api.customer("cust_1").default_card,
            Some(CardId::from("card_1"))
        );
    }

    #[tokio::test]
    async fn test_blank_customer_id_is_rejected() {
        let api = MockApi::new();

        let err = api
            .service()
            .add_card_as_default(&"  ".into(), "tokn_test_1")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidRequest(_)));
        assert!(api.calls().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // destroy_active_schedules
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_only_active_schedules_are_destroyed() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", true), ("b", false), ("c", true)]);

        let report = api
            .service()
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();

        let mut destroyed = api.destroyed();
        destroyed.sort();
        assert_eq!(destroyed, ids(&["a", "c"]));
        assert_eq!(report.outcome(), DestroyOutcome::Deleted);
        assert_eq!(
            report.into_destroy_response().unwrap(),
            DestroyResponse::deleted()
        );
    }

    #[tokio::test]
    async fn test_listing_is_newest_first_with_page_limit() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", true)]);

        api.service()
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();

        let lists = api.list_calls();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].order, Some(Order::ReverseChronological));
        assert_eq!(lists[0].limit, Some(SCHEDULE_PAGE_LIMIT));
    }

    #[tokio::test]
    async fn test_deletions_are_in_flight_together() {
        // Each deletion waits for the other two, so a one-by-one loop would
        // never finish.
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", true), ("b", true), ("c", true)])
            .with_destroy_barrier(3);

        let report = tokio::time::timeout(
            Duration::from_secs(5),
            api.service().destroy_active_schedules(&"cust_1".into()),
        )
        .await
        .expect("deletions did not run concurrently")
        .unwrap();

        assert_eq!(report.outcome(), DestroyOutcome::Deleted);
        assert_eq!(report.deleted.len(), 3);
    }

    #[tokio::test]
    async fn test_no_active_schedules_issues_no_deletes() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", false), ("b", false)]);

        let report = api
            .service()
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();

        assert!(api.destroyed().is_empty());
        assert_eq!(report.outcome(), DestroyOutcome::Deleted);
        assert!(report.into_destroy_response().unwrap().deleted);
    }

    #[tokio::test]
    async fn test_one_failed_delete_fails_the_operation() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", true), ("b", true), ("c", true)])
            .failing(Failure::Destroy("b".into()));

        let report = api
            .service()
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();

        // Every deletion was still attempted.
        assert_eq!(api.destroyed().len(), 3);
        assert_eq!(report.outcome(), DestroyOutcome::Partial);
        assert!(!report.is_complete());

        let mut deleted = report.deleted.clone();
        deleted.sort();
        assert_eq!(deleted, ids(&["a", "c"]));
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, ScheduleId::from("b"));
        assert_eq!(
            report.failed[0].error,
            injected(&Failure::Destroy("b".into()))
        );

        assert!(report.into_destroy_response().is_err());
    }

    #[tokio::test]
    async fn test_all_deletes_failing() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", true), ("c", true)])
            .failing(Failure::Destroy("a".into()))
            .failing(Failure::Destroy("c".into()));

        let report = api
            .service()
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();

        assert_eq!(report.outcome(), DestroyOutcome::Failed);
        assert!(report.deleted.is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_issues_no_deletes() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", true)])
            .failing(Failure::List);

        let result = api
            .service()
            .destroy_active_schedules(&"cust_1".into())
            .await;

        assert_eq!(result.unwrap_err(), injected(&Failure::List));
        assert!(api.destroyed().is_empty());
    }

    #[tokio::test]
    async fn test_pages_through_all_schedules() {
        // Newest first: e, d, c, b, a. Pages of two without a total.
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules(
                "cust_1",
                &[("a", true), ("b", false), ("c", true), ("d", false), ("e", true)],
            )
            .with_max_page_size(2, false);

        let ids_found = api
            .service()
            .active_schedule_ids(&"cust_1".into())
            .await
            .unwrap();

        assert_eq!(ids_found, ids(&["e", "c", "a"]));
        let offsets: Vec<_> = api.list_calls().iter().map(|p| p.offset).collect();
        assert_eq!(offsets, vec![None, Some(2), Some(4)]);
    }

    #[tokio::test]
    async fn test_active_schedule_on_later_page_is_destroyed() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("old", true), ("b", false), ("c", false)])
            .with_max_page_size(2, true);

        let report = api
            .service()
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();

        assert_eq!(report.deleted, ids(&["old"]));
        assert_eq!(api.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_stops_when_listing_does_not_advance() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", true), ("b", true), ("c", true)])
            .with_max_page_size(2, false)
            .ignoring_offset();

        let ids_found = api
            .service()
            .active_schedule_ids(&"cust_1".into())
            .await
            .unwrap();

        assert_eq!(ids_found, ids(&["c", "b"]));
        assert_eq!(api.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_destroy_twice_is_idempotent() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_schedules("cust_1", &[("a", true), ("b", false), ("c", true)]);
        let service = api.service();

        let first = service
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();
        assert_eq!(first.deleted.len(), 2);

        let second = service
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();
        assert_eq!(second.attempted(), 0);
        assert_eq!(second.outcome(), DestroyOutcome::Deleted);
        assert_eq!(api.destroyed().len(), 2);
    }

    #[tokio::test]
    async fn test_other_customers_schedules_untouched() {
        let api = MockApi::new()
            .with_customer("cust_1", &[], None)
            .with_customer("cust_2", &[], None)
            .with_schedules("cust_1", &[("a", true)])
            .with_schedules("cust_2", &[("z", true)]);

        api.service()
            .destroy_active_schedules(&"cust_1".into())
            .await
            .unwrap();

        assert_eq!(api.destroyed(), ids(&["a"]));
    }
}
