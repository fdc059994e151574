use console::Term;
use std::io::{self, Write};
use crate::core::{Board, Cell, WinningLine};
use crate::ui::{GameView, ThemeManager};

const EMPTY_SYMBOL: char = '·';

pub struct Display {
    term: Term,
    theme_manager: ThemeManager,
    cell_width: usize,
    show_coordinates: bool,
}

impl Display {
    pub fn new(theme_manager: ThemeManager, cell_width: usize, show_coordinates: bool) -> io::Result<Self> {
        Ok(Self {
            term: Term::stdout(),
            theme_manager,
            cell_width: cell_width.max(1),
            show_coordinates,
        })
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        self.term.clear_screen()
    }

    pub fn show_message(&self, message: &str, style: &str) -> io::Result<()> {
        let styled_message = self.theme_manager.apply_style(message, style);
        writeln!(io::stdout(), "{}", styled_message)?;
        Ok(())
    }

    pub fn show_error(&self, error: &str) -> io::Result<()> {
        self.show_message(&format!("❌ {}", error), "error")
    }

    pub fn show_success(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("🎉 {}", message), "success")
    }

    pub fn show_warning(&self, message: &str) -> io::Result<()> {
        self.show_message(&format!("⚠️ {}", message), "warning")
    }

    pub fn show_info(&self, message: &str) -> io::Result<()> {
        self.show_message(message, "info")
    }

    // Optional column header, then cell rows separated by rule lines
    pub fn format_board(&self, board: &Board, winning_line: Option<&WinningLine>) -> Vec<String> {
        let size = board.size();
        let width = self.cell_width;
        let gutter = if self.show_coordinates { "   " } else { "" };
        let mut lines = Vec::with_capacity(size * 2);

        if self.show_coordinates {
            let header = (1..=size)
                .map(|col| format!("{:^width$}", col, width = width))
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(format!("{}{}", gutter, self.theme_manager.apply_style(&header, "coordinate")));
        }

        let rule = vec!["─".repeat(width); size].join("┼");
        let styled_rule = self.theme_manager.apply_style(&rule, "grid");
        let divider = self.theme_manager.apply_style("│", "grid");

        for row in 0..size {
            let cells = (0..size)
                .map(|col| {
                    let highlighted = winning_line.is_some_and(|line| line.contains(row, col));
                    self.format_cell(board.get(row, col).unwrap_or_default(), highlighted)
                })
                .collect::<Vec<_>>()
                .join(divider.as_str());

            if self.show_coordinates {
                let label = self.theme_manager.apply_style(&format!("{:>2}", row + 1), "coordinate");
                lines.push(format!("{} {}", label, cells));
            } else {
                lines.push(cells);
            }

            if row + 1 < size {
                lines.push(format!("{}{}", gutter, styled_rule));
            }
        }

        lines
    }

    fn format_cell(&self, cell: Cell, highlighted: bool) -> String {
        let (symbol, style) = match cell {
            Cell::X => ('X', "mark_x"),
            Cell::O => ('O', "mark_o"),
            Cell::Empty => (EMPTY_SYMBOL, "empty"),
        };
        let padded = format!("{:^width$}", symbol, width = self.cell_width);
        let style = if highlighted { "highlight" } else { style };
        self.theme_manager.apply_style(&padded, style)
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        self.theme_manager.set_theme(theme_name)
    }
}

impl GameView for Display {
    fn render_board(&mut self, board: &Board, winning_line: Option<&WinningLine>) -> io::Result<()> {
        self.clear_screen()?;
        writeln!(io::stdout())?;
        for line in self.format_board(board, winning_line) {
            writeln!(io::stdout(), "  {}", line)?;
        }
        writeln!(io::stdout())?;
        Ok(())
    }

    fn show_status(&mut self, message: &str) -> io::Result<()> {
        self.show_message(message, "status")
    }

    fn announce(&mut self, message: &str) -> io::Result<()> {
        self.show_success(message)
    }

    fn warn(&mut self, message: &str) -> io::Result<()> {
        self.show_warning(message)
    }
}
