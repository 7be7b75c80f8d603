//! Text output formatting with colors.

use chrono::{DateTime, Local, Utc};
use custard_core::{FlavorInfo, LocationInfo, LocationKey, ScheduledFlavor};
use custard_providers::ProviderDescriptor;
use custard_store::{LocationEntry, LocationStatus, UpdateState};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    // ========================================================================
    // Providers
    // ========================================================================

    /// Formats provider list header.
    pub fn format_providers_header(&self) -> String {
        format!(
            "{:<14} {:<28} {:<15} {}",
            self.bold("Id"),
            self.bold("Vendor"),
            self.bold("Locations"),
            self.bold("Upcoming")
        )
    }

    /// Formats a single provider line.
    pub fn format_provider_line(&self, desc: &ProviderDescriptor) -> String {
        let upcoming = if desc.metadata.supports_upcoming {
            self.green("✓")
        } else {
            self.dim("−")
        };

        format!(
            "{:<14} {:<28} {:<15} {}",
            desc.provider_id(),
            desc.display_name(),
            desc.metadata.location_source.label(),
            upcoming
        )
    }

    // ========================================================================
    // Locations
    // ========================================================================

    /// Formats one search result line.
    pub fn format_location_line(&self, location: &LocationInfo) -> String {
        format!(
            "{:<36} {}",
            self.cyan(&location.store_id),
            location.display_name()
        )
    }

    /// Formats a location with its details.
    pub fn format_location(&self, location: &LocationInfo) -> String {
        let mut lines = vec![
            self.bold(&location.name),
            format!("Store:   {}", self.cyan(&location.store_id)),
            format!("Address: {}", location.address),
            format!("City:    {}, {}", location.city, location.state),
        ];

        if let Some(zip) = &location.zip_code {
            lines.push(format!("Zip:     {zip}"));
        }
        if let Some(phone) = &location.phone {
            lines.push(format!("Phone:   {phone}"));
        }
        if let Some(url) = &location.website_url {
            lines.push(format!("Web:     {}", self.blue(url)));
        }
        if let Some(hours) = &location.hours {
            lines.push("Hours:".to_string());
            for (day, span) in hours {
                lines.push(format!("  {day:<10} {span}"));
            }
        }

        lines.join("\n")
    }

    /// Formats a saved location line.
    pub fn format_entry_line(&self, entry: &LocationEntry) -> String {
        let interval = entry
            .update_interval_minutes
            .map(|m| format!("every {m}m"))
            .unwrap_or_default();

        format!(
            "{:<44} {} {}",
            self.cyan(&entry.key().unique_id()),
            entry.display_name(),
            self.dim(&interval)
        )
    }

    // ========================================================================
    // Flavors
    // ========================================================================

    /// Formats today's flavor.
    pub fn format_flavor(&self, flavor: &FlavorInfo, heading: &str) -> String {
        let mut lines = vec![self.bold(heading), format!("Flavor: {}", self.green(&flavor.name))];

        if let Some(description) = &flavor.description {
            lines.push(self.dim(description));
        }
        if let Some(ingredients) = flavor.ingredients.as_ref().filter(|i| !i.is_empty()) {
            lines.push(format!("Ingredients: {}", ingredients.join(", ")));
        }
        if let Some(allergens) = flavor.allergens.as_ref().filter(|a| !a.is_empty()) {
            lines.push(format!("Allergens:   {}", self.yellow(&allergens.join(", "))));
        }
        if let Some(price) = &flavor.price {
            lines.push(format!("Price:       {price}"));
        }
        if let Some(date) = flavor.available_date {
            lines.push(format!("Date:        {}", self.format_date(date)));
        }
        if let Some(url) = &flavor.image_url {
            lines.push(format!("Image:       {}", self.blue(url)));
        }

        lines.join("\n")
    }

    /// Formats an upcoming schedule.
    pub fn format_upcoming(&self, heading: &str, schedule: &[ScheduledFlavor]) -> String {
        let mut lines = vec![self.bold(heading)];

        if schedule.is_empty() {
            lines.push(self.dim("No upcoming flavors published"));
        }
        for entry in schedule {
            lines.push(format!(
                "{}  {}",
                self.dim(&entry.date.format("%a %b %e").to_string()),
                entry.flavor.name
            ));
        }

        lines.join("\n")
    }

    // ========================================================================
    // Watch
    // ========================================================================

    /// Formats one polled location.
    pub fn format_status(&self, name: &str, key: &LocationKey, status: &LocationStatus) -> String {
        let flavor = status
            .flavor
            .as_ref()
            .map_or_else(|| self.dim("−"), |f| self.green(&f.name));

        let mut line = format!(
            "{:<32} {:<40} {}",
            self.bold(name),
            flavor,
            self.format_state(&status.state)
        );
        if let Some(updated) = status.updated_at {
            line.push_str(&self.dim(&format!(
                "  updated {}",
                updated.with_timezone(&Local).format("%H:%M")
            )));
        }
        if let Some(reason) = status.state.reason() {
            line.push_str(&format!("\n  {} {}", self.dim(&key.unique_id()), reason));
        }
        line
    }

    /// Formats an update state.
    pub fn format_state(&self, state: &UpdateState) -> String {
        match state {
            UpdateState::Pending => self.dim(state.label()),
            UpdateState::Ok => self.green(state.label()),
            UpdateState::Failed { .. } => self.yellow(state.label()),
            UpdateState::NeedsReauth { .. } => self.red(state.label()),
        }
    }

    /// Formats a check outcome line.
    pub fn format_check(&self, key: &LocationKey, ok: bool) -> String {
        let mark = if ok { self.green("✓") } else { self.red("✗") };
        format!("{mark} {}", key.unique_id())
    }

    fn format_date(&self, date: DateTime<Utc>) -> String {
        date.with_timezone(&Local).format("%a %b %e, %Y").to_string()
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub(crate) fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    pub(crate) fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn blue(&self, text: &str) -> String {
        self.paint(BLUE, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_colors_is_plain() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.bold("Turtle"), "Turtle");
        assert_eq!(formatter.red("x"), "x");
    }

    #[test]
    fn test_colors_wrap_text() {
        let formatter = TextFormatter::new(true);
        assert_eq!(formatter.green("ok"), format!("{GREEN}ok{RESET}"));
        assert!(formatter.format_state(&UpdateState::NeedsReauth {
            reason: "authentication required".into()
        })
        .contains(RED));
    }
}
