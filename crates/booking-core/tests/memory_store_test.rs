//! BookingService + MemoryStore 测试
//!
//! 不依赖外部服务，覆盖完整预订流程和并发下的容量行为。

use std::sync::Arc;

use booking_core::models::{
    Address, EnrollmentWithAddress, Room, Ticket, TicketStatus, TicketType,
};
use booking_core::{
    BookingError, BookingLookup, BookingPolicy, BookingService, CapacityMode, ErrorKind,
    MemoryStore,
};
use chrono::Utc;

// ==================== 辅助函数 ====================

fn seed_room(store: &MemoryStore, id: i64) {
    let now = Utc::now();
    store.insert_room(Room {
        id,
        name: format!("Room {id}"),
        capacity: 3,
        hotel_id: 1,
        created_at: now,
        updated_at: now,
    });
}

/// 写入一个满足预订条件的用户，报名 ID 与用户 ID 相同
fn seed_eligible_user(store: &MemoryStore, user_id: i64) {
    seed_user(store, user_id, TicketStatus::Paid);
}

fn seed_user(store: &MemoryStore, user_id: i64, status: TicketStatus) {
    store.insert_enrollment(EnrollmentWithAddress {
        id: user_id,
        user_id,
        name: format!("User {user_id}"),
        cpf: "12345678909".to_string(),
        birthday: Utc::now(),
        phone: "(21) 98999-9999".to_string(),
        address: Some(Address {
            id: user_id,
            enrollment_id: user_id,
            cep: "20000-000".to_string(),
            street: "Rua A".to_string(),
            city: "Rio".to_string(),
            state: "RJ".to_string(),
            number: "1".to_string(),
            neighborhood: "Centro".to_string(),
            address_detail: None,
        }),
    });
    store.insert_ticket(Ticket {
        id: user_id,
        enrollment_id: user_id,
        ticket_type_id: 1,
        status,
        ticket_type: TicketType {
            id: 1,
            name: "Presencial + Hotel".to_string(),
            price: 60000,
            is_remote: false,
            includes_hotel: true,
        },
    });
}

fn build_service(store: &MemoryStore, policy: BookingPolicy) -> Arc<BookingService> {
    Arc::new(BookingService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        policy,
    ))
}

// ==================== 测试 ====================

#[tokio::test]
async fn test_create_then_get_returns_same_room() {
    let store = MemoryStore::new();
    seed_room(&store, 1);
    seed_eligible_user(&store, 10);
    let service = build_service(&store, BookingPolicy::default());

    let booking = service.create_booking(1, 10).await.unwrap();

    let first = service.get_booking(BookingLookup::ByUser(10)).await.unwrap();
    let second = service.get_booking(BookingLookup::ByUser(10)).await.unwrap();
    assert_eq!(first.id, booking.id);
    assert_eq!(first.room.id, 1);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_fourth_booking_is_rejected() {
    let store = MemoryStore::new();
    seed_room(&store, 1);
    for user_id in 1..=4 {
        seed_eligible_user(&store, user_id);
    }
    let service = build_service(&store, BookingPolicy::default());

    for user_id in 1..=3 {
        service.create_booking(1, user_id).await.unwrap();
    }

    let err = service.create_booking(1, 4).await.unwrap_err();
    assert!(matches!(err, BookingError::RoomFull { .. }));
    assert_eq!(err.kind(), ErrorKind::Forbidden);
    assert_eq!(store.booking_count(), 3);
}

#[tokio::test]
async fn test_unpaid_ticket_is_forbidden() {
    let store = MemoryStore::new();
    seed_room(&store, 1);
    seed_user(&store, 10, TicketStatus::Reserved);
    let service = build_service(&store, BookingPolicy::default());

    let err = service.create_booking(1, 10).await.unwrap_err();
    assert!(matches!(err, BookingError::NotEligible(10)));
    assert_eq!(store.booking_count(), 0);
}

#[tokio::test]
async fn test_swap_into_room_with_existing_booking() {
    let store = MemoryStore::new();
    seed_room(&store, 1);
    seed_room(&store, 2);
    let own = store.insert_booking(10, 1);
    store.insert_booking(20, 2);
    let service = build_service(&store, BookingPolicy::default());

    let updated = service.update_booking(2, 10, own.id).await.unwrap();
    assert_eq!(updated.id, own.id);
    assert_eq!(updated.room_id, 2);

    let found = service.get_booking(BookingLookup::ByUser(10)).await.unwrap();
    assert_eq!(found.room.id, 2);
}

#[tokio::test]
async fn test_swap_into_empty_room_is_not_found() {
    let store = MemoryStore::new();
    seed_room(&store, 1);
    seed_room(&store, 2);
    let own = store.insert_booking(10, 1);
    let service = build_service(&store, BookingPolicy::default());

    let err = service.update_booking(2, 10, own.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_atomic_mode_never_exceeds_capacity() {
    let store = MemoryStore::new();
    seed_room(&store, 1);
    for user_id in 1..=16 {
        seed_eligible_user(&store, user_id);
    }
    let service = build_service(
        &store,
        BookingPolicy {
            capacity_mode: CapacityMode::Atomic,
            ..Default::default()
        },
    );

    let handles: Vec<_> = (1..=16)
        .map(|user_id| {
            let service = service.clone();
            tokio::spawn(async move { service.create_booking(1, user_id).await })
        })
        .collect();

    let mut succeeded = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => succeeded += 1,
            Err(e) => assert_eq!(e.kind(), ErrorKind::Forbidden),
        }
    }

    assert_eq!(succeeded, 3);
    assert_eq!(store.booking_count(), 3);
}
