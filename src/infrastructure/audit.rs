//! Append-only audit log of entries and exits
//!
//! One human-readable line per event, prefixed with the time it was logged.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::application::ExitReceipt;
use crate::domain::Ticket;
use crate::support::time::format_local;

pub struct AuditLog<W: Write = Box<dyn Write + Send>> {
    writer: W,
}

impl AuditLog<File> {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { writer: file })
    }
}

impl<W: Write> AuditLog<W> {
    pub fn from_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn record_entry(&mut self, ticket: &Ticket) -> io::Result<()> {
        self.record_entry_at(ticket, Utc::now())
    }

    pub fn record_entry_at(&mut self, ticket: &Ticket, logged_at: DateTime<Utc>) -> io::Result<()> {
        self.append(logged_at, &entry_line(ticket))
    }

    pub fn record_exit(&mut self, receipt: &ExitReceipt) -> io::Result<()> {
        self.record_exit_at(receipt, Utc::now())
    }

    pub fn record_exit_at(
        &mut self,
        receipt: &ExitReceipt,
        logged_at: DateTime<Utc>,
    ) -> io::Result<()> {
        self.append(logged_at, &exit_line(receipt))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn append(&mut self, logged_at: DateTime<Utc>, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{} | {}", format_local(logged_at), line)?;
        self.writer.flush()
    }
}

impl AuditLog {
    /// Type-erase the writer so callers can hold any sink
    pub fn boxed<W: Write + Send + 'static>(log: AuditLog<W>) -> Self {
        Self {
            writer: Box::new(log.writer),
        }
    }
}

pub fn entry_line(ticket: &Ticket) -> String {
    format!(
        "ENTRY | Ticket:{} | Reg:{} | Type:{} | Slot:{} | Time:{}",
        ticket.id,
        ticket.registration(),
        ticket.vehicle.category,
        ticket.slot,
        format_local(ticket.entry_time),
    )
}

pub fn exit_line(receipt: &ExitReceipt) -> String {
    let ticket = &receipt.ticket;
    format!(
        "EXIT  | Ticket:{} | Reg:{} | Type:{} | Slot:{} | Entry:{} | Exit:{} | Minutes:{} | Amount:{:.2}",
        ticket.id,
        ticket.registration(),
        ticket.vehicle.category,
        ticket.slot,
        format_local(ticket.entry_time),
        format_local(receipt.exit_time),
        receipt.minutes_parked,
        receipt.amount(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FeeCalculator, ParkingLot, Vehicle};
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 2, 29, 18, 5, 0).unwrap()
    }

    fn sample_ticket() -> Ticket {
        let mut lot = ParkingLot::new(2, 2);
        lot.entry_vehicle_at(Vehicle::parse("KA-01-AB-1234", "car").unwrap(), t0())
            .unwrap()
    }

    fn sample_receipt() -> ExitReceipt {
        let ticket = sample_ticket();
        let exit_time = t0() + Duration::minutes(61);
        let minutes_parked = ticket.minutes_parked(exit_time);
        let fee = FeeCalculator::default().calculate_breakdown(ticket.vehicle.category, minutes_parked);
        ExitReceipt {
            ticket,
            exit_time,
            minutes_parked,
            fee,
        }
    }

    #[test]
    fn entry_line_format() {
        assert_eq!(
            entry_line(&sample_ticket()),
            format!(
                "ENTRY | Ticket:TKA01-001 | Reg:KA-01-AB-1234 | Type:CAR | Slot:C-01 | Time:{}",
                format_local(t0())
            )
        );
    }

    #[test]
    fn exit_line_format() {
        assert_eq!(
            exit_line(&sample_receipt()),
            format!(
                "EXIT  | Ticket:TKA01-001 | Reg:KA-01-AB-1234 | Type:CAR | Slot:C-01 | \
                 Entry:{} | Exit:{} | Minutes:61 | Amount:80.00",
                format_local(t0()),
                format_local(t0() + Duration::minutes(61))
            )
        );
    }

    #[test]
    fn lines_are_appended_with_timestamp_prefix() {
        let mut log = AuditLog::from_writer(Vec::new());
        log.record_entry_at(&sample_ticket(), t0()).unwrap();
        log.record_exit_at(&sample_receipt(), t0() + Duration::minutes(61))
            .unwrap();

        let text = String::from_utf8(log.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let entry_prefix = format!("{} | ENTRY | Ticket:TKA01-001", format_local(t0()));
        let exit_prefix = format!(
            "{} | EXIT  | Ticket:TKA01-001",
            format_local(t0() + Duration::minutes(61))
        );
        assert!(lines[0].starts_with(&entry_prefix));
        assert!(lines[1].starts_with(&exit_prefix));
    }

    #[test]
    fn times_are_rendered_in_local_zone() {
        let expected = t0().with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S").to_string();
        assert!(entry_line(&sample_ticket()).ends_with(&format!("Time:{}", expected)));
    }
}
