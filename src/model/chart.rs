use log::debug;

use super::{ColorError, LanguageCount, RankedRepository, adjust_brightness, language_color};

/// The brightness added to a segment color when it is hovered.
pub const HOVER_BRIGHTNESS: i32 = 20;

/// A chart kept in a [`ChartSlot`].
pub trait Chart {
    /// The name of the chart, used in logs.
    fn kind(&self) -> &'static str;
}

/// A segment of the language doughnut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSegment {
    /// The language name.
    pub language: String,

    /// The number of repositories.
    pub count: u32,

    /// The share of the charted repositories, formatted with one decimal.
    pub percentage: String,

    /// The fill color.
    pub color: String,

    /// The fill color when hovered.
    pub hover_color: String,
}

/// The language distribution doughnut chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageChart {
    segments: Vec<LanguageSegment>,
}

impl LanguageChart {
    /// Builds the chart from the language counts.
    pub fn try_new(languages: &[LanguageCount]) -> Result<Self, ColorError> {
        let total: u32 = languages.iter().map(|language| language.count).sum();
        let segments = languages
            .iter()
            .map(|language| {
                let color = language_color(Some(language.language.as_str()));
                Ok(LanguageSegment {
                    language: language.language.clone(),
                    count: language.count,
                    percentage: format_percentage(language.count, total),
                    color: color.to_string(),
                    hover_color: adjust_brightness(color, HOVER_BRIGHTNESS)?,
                })
            })
            .collect::<Result<Vec<_>, ColorError>>()?;

        Ok(Self { segments })
    }

    /// Retrieves the segments of the chart.
    pub fn segments(&self) -> &[LanguageSegment] {
        &self.segments
    }
}

impl Chart for LanguageChart {
    fn kind(&self) -> &'static str {
        "language"
    }
}

/// A bar of the stars chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarBar {
    /// The bar label.
    pub label: String,

    /// The number of stars.
    pub stars: u32,
}

/// The stars per repository bar chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarsChart {
    bars: Vec<StarBar>,
}

impl StarsChart {
    /// Builds the chart from the stars ranking.
    pub fn new(ranking: &[RankedRepository]) -> Self {
        Self {
            bars: ranking
                .iter()
                .map(|entry| StarBar {
                    label: entry.label.clone(),
                    stars: entry.stars,
                })
                .collect(),
        }
    }

    /// Retrieves the bars of the chart.
    pub fn bars(&self) -> &[StarBar] {
        &self.bars
    }

    /// Retrieves the highest number of stars.
    pub fn max_stars(&self) -> u32 {
        self.bars.iter().map(|bar| bar.stars).max().unwrap_or(0)
    }
}

impl Chart for StarsChart {
    fn kind(&self) -> &'static str {
        "stars"
    }
}

/// Owns the chart currently drawn for one chart type.
#[derive(Debug)]
pub struct ChartSlot<C: Chart> {
    chart: Option<C>,
}

impl<C: Chart> Default for ChartSlot<C> {
    fn default() -> Self {
        Self { chart: None }
    }
}

impl<C: Chart> ChartSlot<C> {
    /// Destroys the current chart, then creates and stores a new one.
    pub fn redraw<E>(&mut self, create: impl FnOnce() -> Result<C, E>) -> Result<&C, E> {
        self.destroy();
        let chart: &C = self.chart.insert(create()?);

        Ok(chart)
    }

    /// Destroys the current chart, if any.
    pub fn destroy(&mut self) {
        if let Some(chart) = self.chart.take() {
            debug!("Destroying previous {} chart", chart.kind());
        }
    }

    /// Retrieves the current chart.
    pub fn current(&self) -> Option<&C> {
        self.chart.as_ref()
    }
}

fn format_percentage(count: u32, total: u32) -> String {
    if total == 0 {
        return "0.0".to_string();
    }

    // Tenths of a percent, ties rounded up.
    let (count, total) = (u64::from(count), u64::from(total));
    let tenths = (count * 2000 + total) / (total * 2);

    format!("{}.{}", tenths / 10, tenths % 10)
}
