//! Sesión de consola
//!
//! Bucle del menú principal: muestra el menú, lee una opción y la ejecuta.
//! Los errores no fatales se muestran y se vuelve al menú; los fatales
//! terminan la sesión. El fin de la entrada termina la sesión sin error.

pub mod display;
pub mod input;
pub mod menu;

use std::io::{BufRead, Write};

use tracing::{error, info, warn};

use crate::controllers::{
    CustomerController, DriverController, ItemController, OrderController, RestaurantController,
};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};
use input::{is_end_of_input, Console};
use menu::{main_menu_text, MainMenuOption};

pub const GOODBYE: &str = "Goodbye!";

/// Muestra un error no fatal; devuelve los fatales al llamador
pub fn report_error<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    err: AppError,
) -> AppResult<()> {
    if err.is_fatal() {
        return Err(err);
    }
    warn!("⚠️ Acción rechazada: {}", err);
    console.failure(&err.user_message())?;
    Ok(())
}

pub async fn run_session<R: BufRead, W: Write>(
    state: &AppState,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    console.heading("🍔 Food Quick")?;

    loop {
        console.blank()?;
        console.heading("Main Menu")?;
        console.say(main_menu_text())?;

        let number = match console.read_integer("Enter a number: ") {
            Ok(number) => number,
            Err(e) if is_end_of_input(&e) => {
                info!("📭 Fin de la entrada, cerrando sesión");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        let Some(option) = MainMenuOption::from_number(number) else {
            console.failure("Invalid number entered.")?;
            continue;
        };
        if option == MainMenuOption::Exit {
            console.success(GOODBYE)?;
            info!("👋 Sesión terminada por el operador");
            return Ok(());
        }

        match dispatch(state, option, console).await {
            Ok(()) => {}
            Err(AppError::Io(e)) if is_end_of_input(&e) => {
                info!("📭 Fin de la entrada durante '{}', cerrando sesión", option.label());
                return Ok(());
            }
            Err(e) => {
                if e.is_fatal() {
                    error!("❌ Error fatal en '{}': {}", option.label(), e);
                }
                report_error(console, e)?;
            }
        }
    }
}

async fn dispatch<R: BufRead, W: Write>(
    state: &AppState,
    option: MainMenuOption,
    console: &mut Console<R, W>,
) -> AppResult<()> {
    let orders = OrderController::new(state);

    match option {
        MainMenuOption::CaptureOrder => orders.capture(console).await,
        MainMenuOption::AddItemsToOrder => orders.add_items(console).await,
        MainMenuOption::FindOrder => orders.find(console).await,
        MainMenuOption::ListIncomplete => orders.list_incomplete(console).await,
        MainMenuOption::ListPending => orders.list_pending(console).await,
        MainMenuOption::ListDriverOrders => orders.list_for_driver(console).await,
        MainMenuOption::FinaliseOrder => orders.finalise(console).await,
        MainMenuOption::CaptureCustomer => CustomerController::new(state)
            .capture(console)
            .await
            .map(|_| ()),
        MainMenuOption::UpdateCustomer => CustomerController::new(state).update(console).await,
        MainMenuOption::CaptureRestaurant => RestaurantController::new(state).capture(console).await,
        MainMenuOption::UpdateRestaurant => RestaurantController::new(state).update(console).await,
        MainMenuOption::AddMenuItem => ItemController::new(state).capture(console).await,
        MainMenuOption::EditMenuItem => ItemController::new(state).update(console).await,
        MainMenuOption::CaptureDriver => DriverController::new(state).capture(console).await,
        MainMenuOption::UpdateDriver => DriverController::new(state).update(console).await,
        MainMenuOption::Exit => Ok(()),
    }
}
