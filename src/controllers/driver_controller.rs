use std::io::{BufRead, Write};

use crate::cli::input::Console;
use crate::cli::menu::{update_choice, update_menu_text, UpdateChoice};
use crate::cli::report_error;
use crate::models::{DriverField, NewDriver};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct DriverController<'a> {
    state: &'a AppState,
}

impl<'a> DriverController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Los drivers nuevos empiezan sin carga
    pub async fn capture<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        console.heading("Capture New Driver")?;
        let name = console.read_required("Driver name: ")?;
        let city = console.read_required("Driver location (City): ")?;

        let driver = self
            .state
            .registry
            .create_driver(NewDriver { name, city })
            .await?;
        console.success(&format!(
            "Driver {} captured in {} with number {}.",
            driver.name, driver.city, driver.id
        ))?;
        Ok(())
    }

    pub async fn update<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        loop {
            console.heading("Update Driver")?;
            console.say(update_menu_text::<DriverField>())?;
            let number = console.read_integer("Enter a number: ")?;

            let field = match update_choice::<DriverField>(number) {
                Some(UpdateChoice::Field(field)) => field,
                Some(UpdateChoice::Return) => return Ok(()),
                None => {
                    console.failure("Invalid number entered.")?;
                    continue;
                }
            };

            let id = console.read_integer("Driver number: ")?;
            let value = console.read_line(&format!("New {}: ", field.label()))?;
            match self.state.registry.update_driver(id, field, &value).await {
                Ok(()) => console.success(&format!("{} updated.", field.label()))?,
                Err(e) => report_error(console, e)?,
            }
        }
    }
}
