//! Entrada/salida de consola
//!
//! `Console` es genérico sobre `BufRead`/`Write`, así una sesión completa se
//! puede guionizar en los tests con un `Cursor`. Los errores de formato
//! (texto donde se esperaba un número) nunca salen de aquí: se vuelve a preguntar.
//! El fin de la entrada se devuelve como `io::ErrorKind::UnexpectedEof`.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use colored::*;
use rust_decimal::Decimal;

pub const NON_NUMERIC_INPUT: &str =
    "You entered non-numeric input. Please only enter numeric input as indicated.";

pub struct Console<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.writer)
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        self.say(text.bright_green())
    }

    pub fn failure(&mut self, text: &str) -> io::Result<()> {
        self.say(text.bright_red())
    }

    pub fn heading(&mut self, text: &str) -> io::Result<()> {
        self.say(text.bright_cyan().bold())
    }

    /// Muestra el prompt y lee una línea sin el salto final
    pub fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut buffer = String::new();
        if self.reader.read_line(&mut buffer)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Línea recortada; se repite hasta que no esté vacía
    pub fn read_required(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let value = self.read_line(prompt)?;
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
            self.failure("A value is required.")?;
        }
    }

    pub fn read_integer(&mut self, prompt: &str) -> io::Result<i32> {
        self.read_number(prompt)
    }

    pub fn read_decimal(&mut self, prompt: &str) -> io::Result<Decimal> {
        self.read_number(prompt)
    }

    /// Y/N sin distinguir mayúsculas; cualquier otra cosa vuelve a preguntar
    pub fn read_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            let answer = self.read_line(prompt)?;
            match answer.trim().to_ascii_uppercase().as_str() {
                "Y" | "YES" => return Ok(true),
                "N" | "NO" => return Ok(false),
                _ => self.failure("Please enter Y or N.")?,
            }
        }
    }

    fn read_number<T: FromStr>(&mut self, prompt: &str) -> io::Result<T> {
        loop {
            let raw = self.read_line(prompt)?;
            match raw.trim().parse::<T>() {
                Ok(value) => return Ok(value),
                Err(_) => self.failure(NON_NUMERIC_INPUT)?,
            }
        }
    }
}

/// Fin de la entrada estándar
pub fn is_end_of_input(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::UnexpectedEof
}
