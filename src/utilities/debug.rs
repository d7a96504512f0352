use std::io::{stdout, Stdout, Write};

use crossterm::{cursor, terminal, ExecutableCommand};

use super::panel_event::{Button, PanelEvent};

/// What the front panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelModel {
    internal: Vec<bool>,
    external: Vec<bool>,
    open: bool,
    status: String,
}

impl PanelModel {
    pub fn new(num_floors: u8) -> Self {
        PanelModel {
            internal: vec![false; num_floors as usize],
            external: vec![false; num_floors as usize],
            open: false,
            status: String::new(),
        }
    }

    pub fn apply(&mut self, event: &PanelEvent) {
        match event {
            PanelEvent::Status { .. } => self.status = event.to_string(),
            PanelEvent::ClearLevelButtons(level) => {
                self.set_button(Button::Internal(*level), false);
                self.set_button(Button::External(*level), false);
            },
            PanelEvent::ResetOpenIndicator => self.open = false,
            PanelEvent::ButtonPressed(button) => self.set_button(*button, true),
        }
    }

    fn set_button(&mut self, button: Button, on: bool) {
        let slot = match button {
            Button::Internal(level) => self.internal.get_mut((level as usize).wrapping_sub(1)),
            Button::External(level) => self.external.get_mut((level as usize).wrapping_sub(1)),
            Button::Open => Some(&mut self.open),
        };
        if let Some(slot) = slot {
            *slot = on;
        }
    }

    pub fn num_floors(&self) -> usize {
        self.internal.len()
    }

    pub fn internal_lit(&self, level: u8) -> bool {
        self.internal.get((level as usize).wrapping_sub(1)).copied().unwrap_or(false)
    }

    pub fn external_lit(&self, level: u8) -> bool {
        self.external.get((level as usize).wrapping_sub(1)).copied().unwrap_or(false)
    }

    pub fn open_lit(&self) -> bool {
        self.open
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Writes the panel table for `model`, one row per level from the top down.
pub fn render(model: &PanelModel, out: &mut impl Write) -> std::io::Result<()> {
    let lit = |on: bool| if on { "(*)" } else { "( )" };
    writeln!(out, "+------------+------------+------------+")?;
    writeln!(out, "| {0:<10} | {1:<10} | {2:<10} |", "LEVEL", "CAB", "HALL")?;
    for level in (1..=model.num_floors() as u8).rev() {
        writeln!(out, "+------------+------------+------------+")?;
        writeln!(
            out,
            "| {0:<10} | {1:<10} | {2:<10} |",
            level,
            lit(model.internal_lit(level)),
            lit(model.external_lit(level)),
        )?;
    }
    writeln!(out, "+------------+------------+------------+")?;
    writeln!(out, "| {0:<10} | {1:<23} |", "OPEN", lit(model.open_lit()))?;
    writeln!(out, "+------------+-------------------------+")?;
    writeln!(out, "| {0:<36} |", model.status())?;
    writeln!(out, "+--------------------------------------+")
}

/// Terminal rendition of the front panel. Every redraw clears the whole
/// screen and starts at the top, so lines written in between (log output
/// on stderr) cannot shift the table.
pub struct Debug {
    stdout: Stdout,
    model: PanelModel,
}

impl Debug {
    pub fn new(num_floors: u8) -> Self {
        Debug {
            stdout: stdout(),
            model: PanelModel::new(num_floors),
        }
    }

    pub fn update(&mut self, event: &PanelEvent) -> std::io::Result<()> {
        self.model.apply(event);
        self.printstatus()
    }

    pub fn printstatus(&mut self) -> std::io::Result<()> {
        self.stdout
            .execute(terminal::Clear(terminal::ClearType::All))?
            .execute(cursor::MoveTo(0, 0))?;
        render(&self.model, &mut self.stdout)?;
        self.stdout.flush()
    }
}
