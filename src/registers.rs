// src/registers.rs

//! WD1793 register panel state and its text rendition.

use serde::Serialize;

/// Register names in display order.
pub const REGISTER_NAMES: [&str; 5] = ["Status", "Command", "Track", "Sector", "Data"];

/// What the WD1793 panel shows. Values are injected from outside; nothing here decodes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegisterPanel {
    status: u8,
    command: u8,
    track: u8,
    sector: u8,
    data: u8,
    interrupt: bool,
    data_request: bool,
    #[serde(skip)]
    revision: u64,
}

impl RegisterPanel {
    pub fn new() -> Self {
        RegisterPanel::default()
    }

    pub fn set_status_register(&mut self, value: u8) {
        self.status = value;
        self.revision += 1;
    }

    pub fn set_command_register(&mut self, value: u8) {
        self.command = value;
        self.revision += 1;
    }

    pub fn set_track_register(&mut self, value: u8) {
        self.track = value;
        self.revision += 1;
    }

    pub fn set_sector_register(&mut self, value: u8) {
        self.sector = value;
        self.revision += 1;
    }

    pub fn set_data_register(&mut self, value: u8) {
        self.data = value;
        self.revision += 1;
    }

    pub fn set_interrupt_status(&mut self, active: bool) {
        self.interrupt = active;
        self.revision += 1;
    }

    pub fn set_data_request(&mut self, active: bool) {
        self.data_request = active;
        self.revision += 1;
    }

    /// Bumped by every setter, whether or not the value changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers paired with their names, in display order.
    pub fn registers(&self) -> [(&'static str, u8); 5] {
        [
            (REGISTER_NAMES[0], self.status),
            (REGISTER_NAMES[1], self.command),
            (REGISTER_NAMES[2], self.track),
            (REGISTER_NAMES[3], self.sector),
            (REGISTER_NAMES[4], self.data),
        ]
    }

    pub fn lamps(&self) -> [(&'static str, bool); 2] {
        [("INT", self.interrupt), ("DRQ", self.data_request)]
    }

    /// Plain text rendition for terminals.
    pub fn display(&self) -> String {
        let mut output = Vec::new();
        output.push("WD1793 FDC Status".to_string());
        for (name, value) in self.registers() {
            output.push(format!("{:<9}{}  {}", format!("{}:", name), format_binary(value), format_hex(value)));
        }
        let lamps: Vec<String> = self
            .lamps()
            .iter()
            .map(|(name, on)| format!("{}: {}", name, if *on { "on" } else { "off" }))
            .collect();
        output.push(lamps.join("  "));
        output.join("\n")
    }
}

/// Eight binary digits, most significant bit first.
pub fn format_binary(value: u8) -> String {
    format!("{:08b}", value)
}

pub fn format_hex(value: u8) -> String {
    format!("0x{:02x}", value)
}

/// Parses a byte given as decimal, `0x` hex or `0b` binary.
pub fn parse_byte(s: &str) -> Result<u8, String> {
    let s = s.trim();
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else(|| s.strip_prefix("0B")) {
        u8::from_str_radix(bin, 2)
    } else {
        s.parse::<u8>()
    };
    parsed.map_err(|e| format!("Invalid register value '{}': {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_bits_and_hex() {
        assert_eq!(format_binary(0x80), "10000000");
        assert_eq!(format_binary(5), "00000101");
        assert_eq!(format_hex(0x0a), "0x0a");
        assert_eq!(format_hex(255), "0xff");
    }

    #[test]
    fn setters_are_independent() {
        let mut panel = RegisterPanel::new();
        panel.set_track_register(39);
        panel.set_data_request(true);
        assert_eq!(panel.track, 39);
        assert_eq!(panel.status, 0);
        assert!(panel.data_request);
        assert!(!panel.interrupt);
        assert_eq!(panel.revision(), 2);
    }

    #[test]
    fn text_panel_lists_every_register() {
        let mut panel = RegisterPanel::new();
        panel.set_status_register(0x81);
        panel.set_interrupt_status(true);
        let text = panel.display();
        assert!(text.starts_with("WD1793 FDC Status"));
        assert!(text.contains("Status:  10000001  0x81"));
        assert!(text.contains("Data:    00000000  0x00"));
        assert!(text.contains("INT: on  DRQ: off"));
    }

    #[test]
    fn parses_byte_notations() {
        assert_eq!(parse_byte("0x1F"), Ok(0x1f));
        assert_eq!(parse_byte("0b101"), Ok(5));
        assert_eq!(parse_byte("200"), Ok(200));
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("0xzz").is_err());
    }
}
