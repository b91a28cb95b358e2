use std::io::{BufRead, Write};

use crate::cli::input::Console;
use crate::cli::menu::{update_choice, update_menu_text, UpdateChoice};
use crate::cli::report_error;
use crate::models::{NewRestaurant, RestaurantField};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::optional_text;

pub struct RestaurantController<'a> {
    state: &'a AppState,
}

impl<'a> RestaurantController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    pub async fn capture<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        console.heading("Capture New Restaurant")?;
        let name = console.read_required("Restaurant name: ")?;
        let phone = optional_text(&console.read_line("Restaurant phone number (blank to skip): ")?);
        let city = console.read_required("Restaurant city: ")?;

        let restaurant = self
            .state
            .registry
            .create_restaurant(NewRestaurant { name, phone, city })
            .await?;

        console.success(&format!(
            "Restaurant {} captured with number {}.",
            restaurant.name, restaurant.id
        ))?;
        Ok(())
    }

    pub async fn update<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        loop {
            console.heading("Update Existing Restaurant")?;
            console.say(update_menu_text::<RestaurantField>())?;
            let number = console.read_integer("Enter a number: ")?;

            let field = match update_choice::<RestaurantField>(number) {
                Some(UpdateChoice::Field(field)) => field,
                Some(UpdateChoice::Return) => return Ok(()),
                None => {
                    console.failure("Invalid number entered.")?;
                    continue;
                }
            };

            let id = console.read_integer("Restaurant number: ")?;
            let value = console.read_line(&format!("New {}: ", field.label()))?;
            match self.state.registry.update_restaurant(id, field, &value).await {
                Ok(()) => console.success(&format!("{} updated.", field.label()))?,
                Err(e) => report_error(console, e)?,
            }
        }
    }
}
