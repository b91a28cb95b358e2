use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;

use food_quick::cli::input::{Console, NON_NUMERIC_INPUT};
use food_quick::cli::{run_session, GOODBYE};
use food_quick::models::{NewCustomer, NewDriver, NewItem, NewRestaurant};
use food_quick::repositories::{FoodStore, InMemoryStore};
use food_quick::AppState;

static NEXT_PATH: AtomicUsize = AtomicUsize::new(0);

struct Session {
    store: Arc<InMemoryStore>,
    state: AppState,
    path: PathBuf,
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn session() -> Session {
    session_writing_to(std::env::temp_dir().join(format!(
        "food_quick_cli_{}_{}.txt",
        std::process::id(),
        NEXT_PATH.fetch_add(1, Ordering::SeqCst)
    )))
}

fn session_writing_to(path: PathBuf) -> Session {
    colored::control::set_override(false);
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(store.clone(), path.clone());
    Session { store, state, path }
}

async fn run(session: &Session, script: &str) -> String {
    let mut console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    run_session(&session.state, &mut console)
        .await
        .expect("session ends cleanly");
    String::from_utf8(console.into_writer()).unwrap()
}

struct Catalogue {
    driver_id: i32,
    burger_id: i32,
    chips_id: i32,
}

async fn catalogue(session: &Session) -> Catalogue {
    let registry = &session.state.registry;
    let driver = registry
        .create_driver(NewDriver {
            name: "Sipho".to_string(),
            city: "Pretoria".to_string(),
        })
        .await
        .unwrap();
    registry
        .create_restaurant(NewRestaurant {
            name: "Burger Barn".to_string(),
            phone: Some("0125550000".to_string()),
            city: "Pretoria".to_string(),
        })
        .await
        .unwrap();
    let burger = registry
        .create_item(NewItem {
            name: "Burger".to_string(),
            price: Decimal::new(5000, 2),
        })
        .await
        .unwrap();
    let chips = registry
        .create_item(NewItem {
            name: "Chips".to_string(),
            price: Decimal::new(3000, 2),
        })
        .await
        .unwrap();

    Catalogue {
        driver_id: driver.id,
        burger_id: burger.id,
        chips_id: chips.id,
    }
}

#[tokio::test]
async fn test_capture_and_finalise_order() {
    let s = session();
    let c = catalogue(&s).await;

    let script = format!(
        "1\nN\nThandi\nMokoena\n0825551234\n12 Church Street\nPretoria\nthandi@example.com\n\
         Burger Barn\n\
         1\n{burger}\n2\n\n\
         1\n{chips}\n1\nextra sauce\n\
         2\n\
         16\n",
        burger = c.burger_id,
        chips = c.chips_id
    );
    let out = run(&s, &script).await;
    assert!(out.contains("Customer Thandi Mokoena captured"));
    assert!(out.contains("Total: R130.00"));
    assert!(out.contains("Driver: Sipho"));
    assert!(out.ends_with(&format!("{}\n", GOODBYE)));

    let pending = s.store.pending_orders().await.unwrap();
    assert_eq!(pending.len(), 1);
    let order = &pending[0];
    assert_eq!(order.driver_id, Some(c.driver_id));
    assert_eq!(s.store.find_driver(c.driver_id).await.unwrap().unwrap().workload, 1);

    // Segunda sesión sobre el mismo estado: finalizar dos veces
    let script = format!("7\nY\n{id}\n7\nY\n{id}\nN\n16\n", id = order.id);
    let out = run(&s, &script).await;
    assert!(out.contains("Total: 130.00"));
    assert!(out.contains("1 x Chips (R30.00) Special Instructions: extra sauce"));
    assert!(out.contains(&format!("Order {} finalised.", order.id)));
    assert!(out.contains(&format!("Order {} has already been finalised", order.id)));
    assert_eq!(s.store.find_driver(c.driver_id).await.unwrap().unwrap().workload, 0);

    let log = std::fs::read_to_string(&s.path).unwrap();
    assert_eq!(log.matches("Invoice\n").count(), 1);

    // Reescribir la factura de un pedido ya finalizado
    let script = format!("7\nY\n{id}\nY\n16\n", id = order.id);
    let out = run(&s, &script).await;
    assert!(out.contains("Invoice written to"));
    let log = std::fs::read_to_string(&s.path).unwrap();
    assert_eq!(log.matches("Invoice\n").count(), 2);
    assert_eq!(s.store.find_driver(c.driver_id).await.unwrap().unwrap().workload, 0);
}

#[tokio::test]
async fn test_unwritable_invoice_does_not_end_session() {
    // Un directorio como fichero de facturas
    let s = session_writing_to(std::env::temp_dir());
    let c = catalogue(&s).await;

    let script = format!(
        "1\nN\nThandi\nMokoena\n\n\n\n\nBurger Barn\n1\n{burger}\n1\n\n2\n16\n",
        burger = c.burger_id
    );
    run(&s, &script).await;
    let order_id = s.store.pending_orders().await.unwrap()[0].id;

    let out = run(&s, &format!("7\nY\n{}\n16\n", order_id)).await;
    assert!(out.contains(&format!("The invoice for order {} could not be written", order_id)));
    assert!(out.ends_with(&format!("{}\n", GOODBYE)));

    let order = s.store.find_order(order_id).await.unwrap().unwrap();
    assert!(order.finalised);
    assert_eq!(s.store.find_driver(c.driver_id).await.unwrap().unwrap().workload, 0);
}

#[tokio::test]
async fn test_out_of_range_values_are_rejected() {
    let s = session();
    let c = catalogue(&s).await;

    let script = format!(
        "12\nCatering\n100000000\n\
         1\nN\nThandi\nMokoena\n\n\n\n\nBurger Barn\n\
         1\n{burger}\n2000000\n\
         2\n\
         16\n",
        burger = c.burger_id
    );
    let out = run(&s, &script).await;
    assert!(out.contains("The provided data is invalid"));
    assert!(out.contains("Quantity must be between 1 and 1000."));
    assert!(out.ends_with(&format!("{}\n", GOODBYE)));
    assert!(s.store.find_item(c.chips_id + 1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_order_without_number() {
    let s = session();
    let c = catalogue(&s).await;
    let customer = s
        .state
        .registry
        .create_customer(NewCustomer {
            first_name: "Lerato".to_string(),
            surname: "Dlamini".to_string(),
            phone: None,
            address: None,
            city: None,
            email: None,
        })
        .await
        .unwrap();
    let script = format!(
        "1\nY\nLerato\nDlamini\nBurger Barn\n1\n{burger}\n1\n\n2\n16\n",
        burger = c.burger_id
    );
    run(&s, &script).await;
    let order_id = s.store.pending_orders().await.unwrap()[0].id;

    let script = format!("3\nN\nlerato\ndlamini\nburger barn\n{}\n16\n", order_id);
    let out = run(&s, &script).await;
    assert!(out.contains(&format!("Order Number: {}", order_id)));
    assert!(out.contains("Customer: Lerato Dlamini"));

    // Option 4 lists the customer with missing details
    let out = run(&s, "4\n16\n").await;
    assert!(out.contains("There are no incomplete orders."));
    assert!(out.contains(&format!(
        "Customer {}: Lerato Dlamini (missing: Phone Number, Address, Location (City), Email)",
        customer.id
    )));
}

#[tokio::test]
async fn test_invalid_menu_input() {
    let s = session();
    let out = run(&s, "0\nabc\n17\n16\n").await;
    assert_eq!(out.matches("Invalid number entered.").count(), 2);
    assert_eq!(out.matches(NON_NUMERIC_INPUT).count(), 1);
    assert!(out.contains("16. Exit"));
    assert!(out.contains(GOODBYE));
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let s = session();
    // Se corta a mitad de la captura de un pedido
    let out = run(&s, "1\nY\n").await;
    assert!(out.contains("Customer first name: "));
    assert!(!out.contains(GOODBYE));
    assert!(s.store.pending_orders().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reference_data_menus() {
    let s = session();
    let c = catalogue(&s).await;

    let script = format!(
        "14\nLerato\nCape Town\n\
         15\n2\n{driver}\nDurban\n3\n\
         13\n2\n{burger}\nabc\n55.5\n3\n\
         16\n",
        driver = c.driver_id,
        burger = c.burger_id
    );
    let out = run(&s, &script).await;
    assert!(out.contains("Driver Lerato captured in Cape Town"));
    assert!(out.contains(NON_NUMERIC_INPUT));

    let lerato = s.store.find_driver_by_name("lerato").await.unwrap().unwrap();
    assert_eq!(lerato.city, "Cape Town");
    assert_eq!(lerato.workload, 0);

    let moved = s.store.find_driver(c.driver_id).await.unwrap().unwrap();
    assert_eq!(moved.city, "Durban");

    let burger = s.store.find_item(c.burger_id).await.unwrap().unwrap();
    assert_eq!(burger.price, Decimal::new(555, 1));
}

#[tokio::test]
async fn test_rejected_update_returns_to_sub_menu() {
    let s = session();
    let customer = s
        .state
        .registry
        .create_customer(NewCustomer {
            first_name: "Thandi".to_string(),
            surname: "Mokoena".to_string(),
            phone: None,
            address: None,
            city: None,
            email: None,
        })
        .await
        .unwrap();

    let script = format!(
        "9\n3\n{id}\n12-34\n3\n{id}\n0825551234\n7\n16\n",
        id = customer.id
    );
    let out = run(&s, &script).await;
    assert!(out.contains("'12-34' is not a valid phone number"));
    assert!(out.contains("Phone Number updated."));
    assert!(out.contains(GOODBYE));

    let stored = s.store.find_customer(customer.id).await.unwrap().unwrap();
    assert_eq!(stored.phone.as_deref(), Some("0825551234"));
}
