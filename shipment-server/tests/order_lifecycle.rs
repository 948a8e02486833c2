//! End-to-end order lifecycle tests
//!
//! Uses `ServerState::initialize` for full startup: real SQLite file, embedded
//! migrations, seeded package types and admin account. Exercises the service
//! layer the way the HTTP handlers do.

use shipment_server::auth::JwtConfig;
use shipment_server::{AppError, Config, ServerState};

use shared::models::{
    AddressRequest, CoordinatesRequest, OrderCreate, OrderStatus, Role, UserCreate,
};
use tempfile::TempDir;

async fn test_state() -> (ServerState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("shipment.db");
    let config = Config {
        database_path: db_path.to_str().unwrap().to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-not-for-production".into(),
            expiration_minutes: 60,
            issuer: "shipment-server".into(),
        },
        environment: "test".into(),
    };
    let state = ServerState::initialize(&config).await.unwrap();
    (state, dir)
}

async fn register_client(state: &ServerState, email: &str, full_name: &str) -> i64 {
    let user = state
        .users
        .register(UserCreate {
            email: email.into(),
            password: "hunter2".into(),
            full_name: full_name.into(),
            phone: Some("5551234567".into()),
            role: None,
        })
        .await
        .unwrap();
    assert_eq!(user.role, Role::Client);
    user.id
}

fn address_request(street: &str, coords: Option<CoordinatesRequest>) -> AddressRequest {
    AddressRequest {
        street: street.into(),
        exterior_number: Some("42".into()),
        interior_number: None,
        neighborhood: Some("Centro".into()),
        postal_code: Some("06000".into()),
        city: "Ciudad de Mexico".into(),
        state: "CDMX".into(),
        country: None,
        is_active: None,
        coordinates: coords,
    }
}

fn order_draft(origin: i64, destination: i64, package_type_id: i64, weight: f64) -> OrderCreate {
    OrderCreate {
        order_number: None,
        origin_address_id: origin,
        destination_address_id: destination,
        package_type_id,
        quantity: 1,
        actual_weight_kg: weight,
        status: None,
        observations: None,
        internal_notes: None,
    }
}

#[tokio::test]
async fn test_full_order_lifecycle() {
    let (state, _dir) = test_state().await;
    let client_id = register_client(&state, "maria@example.com", "Maria Lopez").await;
    let admin = state
        .users
        .authenticate("admin@example.com", "admin")
        .await
        .unwrap();

    let coords = CoordinatesRequest {
        latitude: 19.4326,
        longitude: -99.1332,
    };
    let (origin, origin_coords) = state
        .addresses
        .create(client_id, address_request("Av. Reforma", Some(coords)))
        .await
        .unwrap();
    assert!(origin_coords.is_some());
    let (destination, _) = state
        .addresses
        .create(client_id, address_request("Calle Madero", None))
        .await
        .unwrap();

    // seeded type S allows up to 5 kg
    let order = state
        .orders
        .create(client_id, client_id, order_draft(origin.id, destination.id, 1, 2.5))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Created);
    assert!(order.order_number.starts_with("ORD-"));

    state
        .orders
        .update_status(order.id, OrderStatus::Collected, admin.id)
        .await
        .unwrap();
    state
        .orders
        .update_status(order.id, OrderStatus::Delivered, admin.id)
        .await
        .unwrap();

    let history = state.orders.history(client_id, false, order.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].previous_status, Some(OrderStatus::Created));
    assert_eq!(history[0].new_status, OrderStatus::Collected);
    assert_eq!(history[1].previous_status, Some(OrderStatus::Collected));
    assert_eq!(history[1].new_status, OrderStatus::Delivered);
    assert_eq!(history[1].changed_by, admin.id);

    let detail = state.orders.detail(client_id, false, order.id).await.unwrap();
    assert_eq!(detail.status, OrderStatus::Delivered);
    assert_eq!(detail.full_name, "Maria Lopez");
    assert_eq!(detail.ao_street, "Av. Reforma");
    assert_eq!(detail.ad_street, "Calle Madero");

    // another customer cannot see the order
    let stranger = register_client(&state, "pedro@example.com", "Pedro Ramirez").await;
    let err = state.orders.detail(stranger, false, order.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_weight_limits_end_to_end() {
    let (state, _dir) = test_state().await;
    let client_id = register_client(&state, "maria@example.com", "Maria Lopez").await;
    let (origin, _) = state
        .addresses
        .create(client_id, address_request("Av. Reforma", None))
        .await
        .unwrap();
    let (destination, _) = state
        .addresses
        .create(client_id, address_request("Calle Madero", None))
        .await
        .unwrap();

    // 28 kg trips the hard ceiling no matter which type is declared
    let err = state
        .orders
        .create(client_id, client_id, order_draft(origin.id, destination.id, 4, 28.0))
        .await
        .unwrap_err();
    match err {
        AppError::BusinessRule(msg) => assert!(msg.contains("standard 25 kg limit")),
        other => panic!("unexpected error: {other:?}"),
    }

    // 7 kg is under the ceiling but over type S's 5 kg
    let err = state
        .orders
        .create(client_id, client_id, order_draft(origin.id, destination.id, 1, 7.0))
        .await
        .unwrap_err();
    match err {
        AppError::BusinessRule(msg) => assert!(msg.contains("maximum for this package type")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_address_delete_reference_guard() {
    let (state, _dir) = test_state().await;
    let client_id = register_client(&state, "maria@example.com", "Maria Lopez").await;

    let coords = CoordinatesRequest {
        latitude: 19.0,
        longitude: -99.0,
    };
    let (origin, _) = state
        .addresses
        .create(client_id, address_request("Av. Reforma", None))
        .await
        .unwrap();
    let (destination, _) = state
        .addresses
        .create(client_id, address_request("Calle Madero", None))
        .await
        .unwrap();
    state
        .orders
        .create(client_id, client_id, order_draft(origin.id, destination.id, 1, 2.5))
        .await
        .unwrap();

    // both endpoints of the order are protected
    for id in [origin.id, destination.id] {
        let err = state.addresses.delete(client_id, false, id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        state.addresses.get(client_id, false, id).await.unwrap();
    }

    // an unreferenced address goes away together with its coordinate
    let (spare, spare_coords) = state
        .addresses
        .create(client_id, address_request("Av. Juarez", Some(coords)))
        .await
        .unwrap();
    let coord_id = spare_coords.unwrap().id;
    state.addresses.delete(client_id, false, spare.id).await.unwrap();
    let err = state.addresses.get(client_id, false, spare.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let gone = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM coordinates WHERE id = ?")
        .bind(coord_id)
        .fetch_one(&state.pool)
        .await
        .unwrap();
    assert_eq!(gone, 0);
}

#[tokio::test]
async fn test_package_type_toggle_invalidates_cache() {
    let (state, _dir) = test_state().await;
    let client_id = register_client(&state, "maria@example.com", "Maria Lopez").await;
    let (origin, _) = state
        .addresses
        .create(client_id, address_request("Av. Reforma", None))
        .await
        .unwrap();
    let (destination, _) = state
        .addresses
        .create(client_id, address_request("Calle Madero", None))
        .await
        .unwrap();

    state
        .orders
        .create(client_id, client_id, order_draft(origin.id, destination.id, 1, 2.5))
        .await
        .unwrap();

    // deactivating the type takes effect immediately, not after the TTL
    state.package_types.toggle_active(1, false).await.unwrap();
    let err = state
        .orders
        .create(client_id, client_id, order_draft(origin.id, destination.id, 1, 2.5))
        .await
        .unwrap_err();
    match err {
        AppError::BusinessRule(msg) => assert!(msg.contains("not active")),
        other => panic!("unexpected error: {other:?}"),
    }

    state.package_types.toggle_active(1, true).await.unwrap();
    state
        .orders
        .create(client_id, client_id, order_draft(origin.id, destination.id, 1, 2.5))
        .await
        .unwrap();
}
