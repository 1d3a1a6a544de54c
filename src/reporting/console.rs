// Human-readable progress trace and final route report

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};

use crate::models::{Card, CardId, Library, LocationId, Route, RouteStop};
use crate::reporting::{route_report, unmet_labels, RouteReporter};

/// Prints the planning trace and the final route.
///
/// With `trace` off only the final report is written. The first write error
/// stops further output and is returned by [`ConsoleReporter::finish`].
pub struct ConsoleReporter<'a, W: Write = io::Stdout> {
    cards: &'a HashMap<CardId, Card>,
    libraries: &'a HashMap<LocationId, Library>,
    out: W,
    trace: bool,
    error: Option<io::Error>,
}

impl<'a> ConsoleReporter<'a> {
    /// Reporter writing to stdout
    pub fn stdout(
        cards: &'a HashMap<CardId, Card>,
        libraries: &'a HashMap<LocationId, Library>,
        trace: bool,
    ) -> Self {
        Self::new(cards, libraries, io::stdout(), trace)
    }
}

impl<'a, W: Write> ConsoleReporter<'a, W> {
    pub fn new(
        cards: &'a HashMap<CardId, Card>,
        libraries: &'a HashMap<LocationId, Library>,
        out: W,
        trace: bool,
    ) -> Self {
        Self {
            cards,
            libraries,
            out,
            trace,
            error: None,
        }
    }

    /// Flushes and returns the writer, or the first error hit while reporting
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|_| self.out.write_all(b"\n")) {
            self.error = Some(e);
        }
    }

    fn library_name<'b>(&'b self, library_id: &'b str) -> &'b str {
        self.libraries
            .get(library_id)
            .map(|library| library.name.as_str())
            .unwrap_or(library_id)
    }

    fn banner(&mut self, title: &str) {
        let rule = "*".repeat(title.len() + 4);
        self.line(format_args!("\n{}\n* {} *\n{}\n", rule, title, rule));
    }

    fn print_unmet(&mut self, unmet: &[CardId]) {
        self.line(format_args!(
            "unable to collect all cards. {} remaining cards",
            unmet.len()
        ));
        for label in unmet_labels(unmet, self.cards) {
            self.line(format_args!("{}", label));
        }
    }

    fn print_route(&mut self, route: &Route) {
        self.banner("planned route");
        for (name, label) in route_report(route, self.cards, self.libraries) {
            self.line(format_args!("Library: {} | Card: {}", name, label));
        }
        self.line(format_args!(
            "\n{} stops, total distance {:.4}",
            route.len(),
            route.total_distance()
        ));
    }
}

impl<W: Write> RouteReporter for ConsoleReporter<'_, W> {
    fn started(&mut self, start: &Library) {
        if self.trace {
            self.banner("simulating route...");
            self.line(format_args!("Starting at library {}", start.name));
        }
    }

    fn visited(&mut self, stop: &RouteStop) {
        if self.trace {
            let name = self.library_name(&stop.library).to_string();
            self.line(format_args!("Next stop {} ({:.4} away)", name, stop.distance));
        }
    }

    fn success(&mut self, route: &Route) {
        self.print_route(route);
    }

    fn stalled(&mut self, route: &Route, unmet: &[CardId]) {
        if self.trace {
            self.banner("stopping simulation");
        }
        self.print_unmet(unmet);
        self.print_route(route);
    }

    fn aborted(&mut self, route: &Route, unmet: &[CardId]) {
        self.line(format_args!("unsolvable: iteration budget exhausted"));
        self.print_unmet(unmet);
        self.print_route(route);
    }
}
