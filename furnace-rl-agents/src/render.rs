//! Text visualizer for the furnace.
//!
//! One line per tick: step, temperature, heat level, a gauge over the
//! observation bound, the valve state driven by the agent's last action and
//! a sparkline of recent temperatures.

use std::io::Write;
use std::ops::ControlFlow;
use std::thread;
use std::time::Duration;

use furnace_rl::{
    data::memory::{History, Tick},
    driver::Observer,
    environment::furnace::{FurnaceAction, FurnaceConfig, HeatLevel},
};
use tracing::warn;

const SPARKS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub struct TerminalRenderer<W: Write> {
    out: W,
    config: FurnaceConfig,
    history: History<Tick>,
    tick: u64,
    gauge_width: usize,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, config: &FurnaceConfig) -> Self {
        TerminalRenderer {
            out,
            config: config.clone(),
            history: History::new(24),
            tick: 0,
            gauge_width: 20,
        }
    }

    pub fn with_trend_len(mut self, len: usize) -> Self {
        self.history = History::new(len);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn fraction(&self, temperature: f64) -> f64 {
        let (low, high) = (self.config.observation_low, self.config.observation_high);
        ((temperature - low) / (high - low)).clamp(0.0, 1.0)
    }

    fn gauge(&self, temperature: f64) -> String {
        let filled = (self.fraction(temperature) * self.gauge_width as f64).round() as usize;
        let mut gauge = "#".repeat(filled);
        gauge.push_str(&".".repeat(self.gauge_width - filled));
        gauge
    }

    fn trend(&self) -> String {
        self.history
            .temperatures()
            .map(|t| SPARKS[(self.fraction(t) * (SPARKS.len() - 1) as f64).round() as usize])
            .collect()
    }

    fn line(&self, temperature: f64, action: FurnaceAction) -> String {
        format!(
            "[{:03}] {:>6.1}°C {:<7} |{}| {:<20} {}",
            self.tick,
            temperature,
            level_label(self.config.heat_level(temperature)),
            self.gauge(temperature),
            valve_label(action),
            self.trend()
        )
    }
}

fn level_label(level: HeatLevel) -> &'static str {
    match level {
        HeatLevel::Off => "off",
        HeatLevel::Low => "low",
        HeatLevel::InBand => "in band",
        HeatLevel::High => "high",
    }
}

fn valve_label(action: FurnaceAction) -> &'static str {
    match action {
        FurnaceAction::Heat => "opening valve (heat)",
        FurnaceAction::Cool => "closing valve (cool)",
    }
}

impl<W: Write> Observer for TerminalRenderer<W> {
    fn on_reset(&mut self, temperature: f64) {
        self.history.clear();
        self.tick = 0;
        if let Err(err) = writeln!(self.out, "--- furnace reset to {temperature:.1}°C ---") {
            warn!(%err, "renderer failed to write");
        }
    }

    fn observe(&mut self, temperature: f64, action: FurnaceAction) -> ControlFlow<()> {
        self.tick += 1;
        self.history.push(Tick {
            temperature,
            action,
        });
        let line = self.line(temperature, action);
        match writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => {
                warn!(%err, "renderer failed to write, stopping");
                ControlFlow::Break(())
            }
        }
    }
}

/// Sleeps after every observed tick so a human can follow along.
pub struct Paced<V> {
    inner: V,
    delay: Duration,
}

impl<V> Paced<V> {
    pub fn new(inner: V, delay: Duration) -> Self {
        Paced { inner, delay }
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: Observer> Observer for Paced<V> {
    fn on_reset(&mut self, temperature: f64) {
        self.inner.on_reset(temperature);
    }

    fn observe(&mut self, temperature: f64, action: FurnaceAction) -> ControlFlow<()> {
        let flow = self.inner.observe(temperature, action);
        if flow.is_continue() && !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        flow
    }
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use furnace_rl::{driver::Simulation, module::rule_based::RuleBasedController};

    use super::*;

    #[test]
    fn test_render_episode() {
        let config = FurnaceConfig::new().with_max_steps(3);
        let env = config.init().unwrap();
        let renderer = TerminalRenderer::new(Vec::new(), &config);
        let mut simulation = Simulation::new(
            env,
            RuleBasedController::from_config(&config),
            Paced::new(renderer, Duration::ZERO),
        );
        simulation.run_episode(None).unwrap();

        let (_, _, observer) = simulation.into_parts();
        let output = String::from_utf8(observer.into_inner().into_inner()).unwrap();
        let expected = expect![[r#"
            --- furnace reset to 150.0°C ---
            [001]  155.0°C low     |##########..........| opening valve (heat) ▅
            [002]  160.0°C low     |###########.........| opening valve (heat) ▅▅
            [003]  165.0°C low     |###########.........| opening valve (heat) ▅▅▅
        "#]];
        expected.assert_eq(&output);
    }

    #[test]
    fn test_gauge_is_clamped() {
        let config = FurnaceConfig::new();
        let renderer = TerminalRenderer::new(Vec::new(), &config);
        assert_eq!(renderer.gauge(-40.0), ".".repeat(20));
        assert_eq!(renderer.gauge(1150.0), "#".repeat(20));
        assert_eq!(renderer.gauge(150.0), format!("{}{}", "#".repeat(10), ".".repeat(10)));
    }

    #[test]
    fn test_line_labels() {
        let config = FurnaceConfig::new();
        let mut renderer = TerminalRenderer::new(Vec::new(), &config).with_trend_len(2);
        for (temperature, action) in [
            (100.0, FurnaceAction::Cool),
            (200.0, FurnaceAction::Heat),
            (300.0, FurnaceAction::Cool),
        ] {
            let _ = renderer.observe(temperature, action);
        }
        let line = renderer.line(300.0, FurnaceAction::Cool);
        assert_eq!(
            line,
            "[003]  300.0°C high    |####################| closing valve (cool) ▆█"
        );
        assert_eq!(level_label(config.heat_level(100.0)), "off");
        assert_eq!(level_label(config.heat_level(200.0)), "in band");
    }
}
