//! Interactive operator console
//!
//! Text menu over a [`ParkingService`]. Parses and validates operator input,
//! renders results and appends entry/exit lines to the audit log. Every
//! error is reported and the menu continues; end of input quits.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{debug, warn};

use crate::application::{ExitReceipt, SharedParkingService};
use crate::domain::{DomainError, Registration, Ticket, Vehicle, VehicleCategory};
use crate::infrastructure::AuditLog;
use crate::support::time::format_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Entry,
    Exit,
    Occupancy,
    ActiveTickets,
    Reset,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Entry),
            "2" => Ok(Self::Exit),
            "3" => Ok(Self::Occupancy),
            "4" => Ok(Self::ActiveTickets),
            "5" => Ok(Self::Reset),
            "6" => Ok(Self::Quit),
            _ => Err(()),
        }
    }
}

pub struct Console<R, W> {
    service: SharedParkingService,
    audit: Option<AuditLog>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(
        service: SharedParkingService,
        audit: Option<AuditLog>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            service,
            audit,
            input,
            output,
        }
    }

    /// Run the menu loop until the operator quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "=== Welcome to Small Mall Parking System ===")?;

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter choice: ")? else {
                debug!("Console input closed");
                break;
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Entry) => self.do_entry()?,
                Ok(MenuChoice::Exit) => self.do_exit()?,
                Ok(MenuChoice::Occupancy) => self.print_occupancy()?,
                Ok(MenuChoice::ActiveTickets) => self.print_active_tickets()?,
                Ok(MenuChoice::Reset) => self.do_reset()?,
                Ok(MenuChoice::Quit) => {
                    writeln!(self.output, "Exiting. Bye!")?;
                    break;
                }
                Err(()) => writeln!(self.output, "Invalid choice. Try again.")?,
            }
        }

        Ok(())
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Choose an option:")?;
        writeln!(self.output, "1. Vehicle Entry")?;
        writeln!(self.output, "2. Vehicle Exit")?;
        writeln!(self.output, "3. Show Occupancy")?;
        writeln!(self.output, "4. Show Active Tickets")?;
        writeln!(self.output, "5. Configure Slots (reset)")?;
        writeln!(self.output, "6. Exit application")
    }

    fn do_entry(&mut self) -> io::Result<()> {
        let Some(raw_type) = self.prompt("Enter vehicle type (CAR / BIKE): ")? else {
            return Ok(());
        };
        let category = match raw_type.parse::<VehicleCategory>() {
            Ok(c) => c,
            Err(e) => return self.report(&e),
        };

        let Some(raw_reg) = self.prompt("Enter vehicle registration number: ")? else {
            return Ok(());
        };
        let registration = match Registration::parse(&raw_reg) {
            Ok(r) => r,
            Err(e) => return self.report(&e),
        };

        match self.service.enter(Vehicle::new(registration, category)) {
            Ok(ticket) => {
                writeln!(self.output, "Assigned Slot: {}", ticket.slot)?;
                writeln!(self.output, "Ticket ID: {}", ticket.id)?;
                writeln!(
                    self.output,
                    "Entry Time: {}",
                    format_local(ticket.entry_time)
                )?;
                self.audit_entry(&ticket);
                Ok(())
            }
            Err(e) => self.report(&e),
        }
    }

    fn do_exit(&mut self) -> io::Result<()> {
        let Some(raw_reg) = self.prompt("Enter vehicle registration number to exit: ")? else {
            return Ok(());
        };
        let registration = match Registration::parse(&raw_reg) {
            Ok(r) => r,
            Err(e) => return self.report(&e),
        };

        match self.service.checkout(&registration) {
            Ok(receipt) => {
                writeln!(
                    self.output,
                    "Exit Time: {}",
                    format_local(receipt.exit_time)
                )?;
                writeln!(
                    self.output,
                    "Parked duration (minutes): {}",
                    receipt.minutes_parked
                )?;
                writeln!(self.output, "Amount to pay: {}", receipt.fee.format_total())?;
                self.audit_exit(&receipt);
                Ok(())
            }
            Err(DomainError::NotFound { .. }) => writeln!(
                self.output,
                "No active ticket found for this registration."
            ),
            Err(e) => self.report(&e),
        }
    }

    fn do_reset(&mut self) -> io::Result<()> {
        let Some(car_slots) = self.prompt_count("Enter car slots: ")? else {
            return Ok(());
        };
        let Some(bike_slots) = self.prompt_count("Enter bike slots: ")? else {
            return Ok(());
        };
        self.service.reset(car_slots, bike_slots);
        writeln!(self.output, "Parking lot reset.")
    }

    fn print_occupancy(&mut self) -> io::Result<()> {
        let occ = self.service.occupancy();
        writeln!(self.output, "--- Parking Occupancy ---")?;
        writeln!(
            self.output,
            "Cars: {}/{} occupied",
            occ.car_occupied, occ.car_total
        )?;
        writeln!(
            self.output,
            "Bikes: {}/{} occupied",
            occ.bike_occupied, occ.bike_total
        )
    }

    fn print_active_tickets(&mut self) -> io::Result<()> {
        let tickets = self.service.active_tickets();
        writeln!(self.output, "--- Active Tickets ---")?;
        if tickets.is_empty() {
            return writeln!(self.output, "None");
        }
        for t in &tickets {
            writeln!(
                self.output,
                "Ticket:{} | Reg:{} | Type:{} | Slot:{} | Entry:{}",
                t.id,
                t.registration(),
                t.vehicle.category,
                t.slot,
                format_local(t.entry_time)
            )?;
        }
        Ok(())
    }

    /// Prompt for a non-negative count; `None` on end of input or bad number
    fn prompt_count(&mut self, message: &str) -> io::Result<Option<u32>> {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match raw.parse::<u32>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                writeln!(self.output, "Error: '{}' is not a valid slot count", raw)?;
                Ok(None)
            }
        }
    }

    /// Print `message` and read one trimmed line; `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn report(&mut self, error: &DomainError) -> io::Result<()> {
        writeln!(self.output, "Error: {}", error)
    }

    fn audit_entry(&mut self, ticket: &Ticket) {
        if let Some(audit) = self.audit.as_mut() {
            if let Err(e) = audit.record_entry(ticket) {
                warn!(ticket_id = %ticket.id, error = %e, "Failed to write audit entry");
            }
        }
    }

    fn audit_exit(&mut self, receipt: &ExitReceipt) {
        if let Some(audit) = self.audit.as_mut() {
            if let Err(e) = audit.record_exit(receipt) {
                warn!(ticket_id = %receipt.ticket.id, error = %e, "Failed to write audit exit");
            }
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
