mod common;

use std::sync::Arc;

use fuel_settlement::models::usage::ShareSpec;
use fuel_settlement::services::refill_service::{RefillEventInput, RefillService};
use fuel_settlement::services::store::{FuelStore, PageParams};
use fuel_settlement::services::usage_service::{UsageEventInput, UsageService};
use fuel_settlement::utils::errors::AppError;

use common::{dec, id, person, time, usage_event, vehicle, MemStore};

fn seeded_store() -> Arc<MemStore> {
    let store = Arc::new(MemStore::new());
    store.add_vehicle(vehicle(1, "red car"));
    store.add_person(person(10, "alice"));
    store.add_person(person(11, "bob"));
    store
}

fn usage_input(participants: Vec<ShareSpec>) -> UsageEventInput {
    UsageEventInput {
        vehicle_id: id(1),
        event_time: time(5, 9),
        fuel_price: dec("1.41"),
        kilometer_before: 800,
        kilometer_after: 700,
        description: "weekend trip".to_string(),
        participants,
    }
}

#[tokio::test]
async fn create_derives_total_cost_and_per_head_share() {
    let store = seeded_store();
    let service = UsageService::new(store.clone());

    let event_id = service
        .create(usage_input(vec![
            ShareSpec { person_id: id(10), paid: false },
            ShareSpec { person_id: id(11), paid: false },
        ]))
        .await
        .unwrap();

    let event = store.usage_event_by_id(event_id).await.unwrap().unwrap();
    assert_eq!(event.total_cost, dec("141.00"));
    assert_eq!(event.pay_each, dec("70.50"));
    assert_eq!(store.shares_for_event(event_id).len(), 2);
}

#[tokio::test]
async fn create_rejects_a_non_decreasing_odometer_before_writing() {
    let store = seeded_store();
    let service = UsageService::new(store.clone());

    let mut input = usage_input(vec![ShareSpec { person_id: id(10), paid: false }]);
    input.kilometer_before = 700;
    input.kilometer_after = 700;

    let result = service.create(input).await;

    assert!(matches!(result, Err(AppError::InvalidOdometerRange { .. })));
    let (_, total) = store
        .usage_events_page(id(1), PageParams { page_index: 1, page_size: 10 })
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn create_rejects_an_empty_participant_list() {
    let store = seeded_store();
    let service = UsageService::new(store.clone());

    let result = service.create(usage_input(vec![])).await;

    assert!(matches!(result, Err(AppError::InvalidParticipantCount(0))));
}

#[tokio::test]
async fn update_replaces_the_share_set_wholesale() {
    let store = seeded_store();
    let service = UsageService::new(store.clone());

    let event_id = service
        .create(usage_input(vec![
            ShareSpec { person_id: id(10), paid: true },
            ShareSpec { person_id: id(11), paid: false },
        ]))
        .await
        .unwrap();

    let mut input = usage_input(vec![ShareSpec { person_id: id(11), paid: false }]);
    input.description = "solo after all".to_string();
    service.update(event_id, input).await.unwrap();

    let shares = store.shares_for_event(event_id);
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].person_id, id(11));
    // one participant now carries the whole cost
    let event = store.usage_event_by_id(event_id).await.unwrap().unwrap();
    assert_eq!(event.pay_each, dec("141.00"));
    assert_eq!(event.description, "solo after all");
}

#[tokio::test]
async fn update_of_a_missing_event_is_not_found() {
    let store = seeded_store();
    let service = UsageService::new(store);

    let result = service
        .update(
            id(999),
            usage_input(vec![ShareSpec { person_id: id(10), paid: false }]),
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn delete_removes_the_event_and_its_shares() {
    let store = seeded_store();
    let service = UsageService::new(store.clone());

    let event_id = service
        .create(usage_input(vec![
            ShareSpec { person_id: id(10), paid: false },
            ShareSpec { person_id: id(11), paid: false },
        ]))
        .await
        .unwrap();

    service.delete(event_id).await.unwrap();

    assert!(store.usage_event_by_id(event_id).await.unwrap().is_none());
    assert!(store.shares_for_event(event_id).is_empty());
}

#[tokio::test]
async fn listing_pages_newest_first_with_page_math() {
    let store = seeded_store();
    for day in 1..=5 {
        store.add_usage_event(usage_event(100 + day as u128, 1, time(day, 9)));
    }
    let service = UsageService::new(store);

    let page = service
        .list(id(1), PageParams { page_index: 1, page_size: 2 })
        .await
        .unwrap();

    assert_eq!(page.total_records, 5);
    assert_eq!(page.total_pages, 3);
    let ids: Vec<_> = page.items.iter().map(|i| i.event.id).collect();
    assert_eq!(ids, vec![id(105), id(104)]);
}

#[tokio::test]
async fn refill_create_derives_the_unit_price() {
    let store = seeded_store();
    let service = RefillService::new(store.clone());

    let refill_id = service
        .create(RefillEventInput {
            vehicle_id: id(1),
            refill_time: time(4, 8),
            total_money: dec("52.00"),
            kilometer_before: 700,
            kilometer_after: 1100,
            paid: false,
            refill_by: id(10),
            acting_person_id: id(11),
        })
        .await
        .unwrap();

    let refill = store.refill(refill_id).unwrap();
    assert_eq!(refill.unit_price_calculated, dec("0.13"));
    assert_eq!(refill.created_by, id(11));
    assert_eq!(refill.refill_by, id(10));
}

#[tokio::test]
async fn refill_create_rejects_a_non_increasing_odometer() {
    let store = seeded_store();
    let service = RefillService::new(store);

    let result = service
        .create(RefillEventInput {
            vehicle_id: id(1),
            refill_time: time(4, 8),
            total_money: dec("52.00"),
            kilometer_before: 1100,
            kilometer_after: 1100,
            paid: false,
            refill_by: id(10),
            acting_person_id: id(10),
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidOdometerRange { .. })));
}

#[tokio::test]
async fn refill_update_keeps_the_creator_and_records_the_editor() {
    let store = seeded_store();
    let service = RefillService::new(store.clone());

    let refill_id = service
        .create(RefillEventInput {
            vehicle_id: id(1),
            refill_time: time(4, 8),
            total_money: dec("52.00"),
            kilometer_before: 700,
            kilometer_after: 1100,
            paid: false,
            refill_by: id(10),
            acting_person_id: id(10),
        })
        .await
        .unwrap();

    service
        .update(
            refill_id,
            RefillEventInput {
                vehicle_id: id(1),
                refill_time: time(4, 8),
                total_money: dec("60.00"),
                kilometer_before: 700,
                kilometer_after: 1100,
                paid: false,
                refill_by: id(10),
                acting_person_id: id(11),
            },
        )
        .await
        .unwrap();

    let refill = store.refill(refill_id).unwrap();
    assert_eq!(refill.total_money, dec("60.00"));
    assert_eq!(refill.unit_price_calculated, dec("0.15"));
    assert_eq!(refill.created_by, id(10));
    assert_eq!(refill.updated_by, id(11));
}
