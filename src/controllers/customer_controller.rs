use std::io::{BufRead, Write};

use crate::cli::input::Console;
use crate::cli::menu::{update_choice, update_menu_text, UpdateChoice};
use crate::cli::report_error;
use crate::models::{Customer, CustomerField, NewCustomer};
use crate::state::AppState;
use crate::utils::errors::AppResult;
use crate::utils::validation::optional_text;

pub struct CustomerController<'a> {
    state: &'a AppState,
}

impl<'a> CustomerController<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Registra un customer; los datos de contacto pueden quedar vacíos
    pub async fn capture<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> AppResult<Customer> {
        console.heading("Capture New Customer")?;
        let first_name = console.read_required("Customer first name: ")?;
        let surname = console.read_required("Customer surname: ")?;
        let phone = optional_text(&console.read_line("Phone number (digits only, blank to skip): ")?);
        let address = optional_text(&console.read_line("Address (blank to skip): ")?);
        let city = optional_text(&console.read_line("Location (City) (blank to skip): ")?);
        let email = optional_text(&console.read_line("Email (blank to skip): ")?);

        let customer = self
            .state
            .registry
            .create_customer(NewCustomer {
                first_name,
                surname,
                phone,
                address,
                city,
                email,
            })
            .await?;

        console.success(&format!(
            "Customer {} captured with number {}.",
            customer.full_name(),
            customer.id
        ))?;
        Ok(customer)
    }

    pub async fn update<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> AppResult<()> {
        loop {
            console.heading("Update Existing Customers")?;
            console.say(update_menu_text::<CustomerField>())?;
            let number = console.read_integer("Enter a number: ")?;

            let field = match update_choice::<CustomerField>(number) {
                Some(UpdateChoice::Field(field)) => field,
                Some(UpdateChoice::Return) => return Ok(()),
                None => {
                    console.failure("Invalid number entered.")?;
                    continue;
                }
            };

            let id = console.read_integer("Customer number: ")?;
            let value = console.read_line(&format!("New {}: ", field.label()))?;
            match self.state.registry.update_customer(id, field, &value).await {
                Ok(()) => console.success(&format!("{} updated.", field.label()))?,
                Err(e) => report_error(console, e)?,
            }
        }
    }
}
