use std::{io::Write, time::Duration};

use log::debug;
use tokio::{sync::Mutex, time::sleep};

use crate::{
    ChartSlot, CounterAnimation, DashboardRenderer, LanguageChart, LanguageCount,
    RankedRepository, Repository, StarsChart, StdResult, UserProfile, format_count,
};

/// The width of the longest chart bar, in characters.
const BAR_WIDTH: u32 = 30;

/// How the profile counters are animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSettings {
    /// The duration of the animation.
    pub duration: Duration,

    /// The number of frames drawn during the animation.
    pub frames: u32,
}

struct TerminalState<W> {
    out: W,
    language_chart: ChartSlot<LanguageChart>,
    stars_chart: ChartSlot<StarsChart>,
    profile_visible: bool,
}

/// Renders dashboards as plain text.
pub struct TerminalRenderer<W> {
    state: Mutex<TerminalState<W>>,
    counters: Option<CounterSettings>,
}

impl<W: Write + Send> TerminalRenderer<W> {
    /// Creates a new `TerminalRenderer` writing to `out`.
    ///
    /// Counters are animated when `counters` is set.
    pub fn new(out: W, counters: Option<CounterSettings>) -> Self {
        Self {
            state: Mutex::new(TerminalState {
                out,
                language_chart: ChartSlot::default(),
                stars_chart: ChartSlot::default(),
                profile_visible: false,
            }),
            counters,
        }
    }

    /// Consumes the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.state.into_inner().out
    }
}

fn stats_line([repositories, followers, following, stars]: [u64; 4]) -> String {
    format!(
        "Repositories: {}  Followers: {}  Following: {}  Stars: {}",
        format_count(repositories),
        format_count(followers),
        format_count(following),
        format_count(stars),
    )
}

fn bar(value: u32, max: u32) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (u64::from(value) * u64::from(BAR_WIDTH)).div_ceil(u64::from(max));

    "#".repeat(width as usize)
}

fn write_repository(out: &mut impl Write, repository: &Repository) -> StdResult<()> {
    let language = repository
        .language()
        .map(|language| format!(" [{language}]"))
        .unwrap_or_default();
    writeln!(
        out,
        "  {}{language}  stars {}  forks {}  watchers {}",
        repository.name(),
        format_count(u64::from(repository.stars())),
        format_count(u64::from(repository.forks())),
        format_count(u64::from(repository.watchers())),
    )?;
    writeln!(out, "      {}", repository.display_description())?;
    if !repository.html_url().is_empty() {
        writeln!(out, "      {}", repository.html_url())?;
    }

    Ok(())
}

fn draw_language_chart(out: &mut impl Write, chart: &LanguageChart) -> StdResult<()> {
    writeln!(out, "Languages:")?;
    if chart.segments().is_empty() {
        writeln!(out, "  No language data")?;
    }
    let max = chart
        .segments()
        .iter()
        .map(|segment| segment.count)
        .max()
        .unwrap_or(0);
    for segment in chart.segments() {
        writeln!(
            out,
            "  {:<12} {:<width$} {}% ({} repos) {}",
            segment.language,
            bar(segment.count, max),
            segment.percentage,
            segment.count,
            segment.color,
            width = BAR_WIDTH as usize,
        )?;
    }

    Ok(())
}

fn draw_stars_chart(out: &mut impl Write, chart: &StarsChart) -> StdResult<()> {
    writeln!(out, "Stars:")?;
    if chart.bars().is_empty() {
        writeln!(out, "  No starred repositories")?;
    }
    for star_bar in chart.bars() {
        writeln!(
            out,
            "  {:<18} {:<width$} {}",
            star_bar.label,
            bar(star_bar.stars, chart.max_stars()),
            format_count(u64::from(star_bar.stars)),
            width = BAR_WIDTH as usize,
        )?;
    }

    Ok(())
}

#[async_trait::async_trait]
impl<W: Write + Send> DashboardRenderer for TerminalRenderer<W> {
    async fn show_loading(&self) -> StdResult<()> {
        let mut state = self.state.lock().await;
        writeln!(state.out, "Searching...")?;
        state.out.flush()?;

        Ok(())
    }

    // Written lines stay on screen.
    async fn hide_loading(&self) -> StdResult<()> {
        Ok(())
    }

    async fn show_error(&self, message: &str) -> StdResult<()> {
        let mut state = self.state.lock().await;
        writeln!(state.out, "Error: {message}")?;
        state.out.flush()?;

        Ok(())
    }

    async fn hide_error(&self) -> StdResult<()> {
        Ok(())
    }

    async fn hide_profile(&self) -> StdResult<()> {
        let mut state = self.state.lock().await;
        if state.profile_visible {
            debug!("Hiding previous profile");
        }
        state.profile_visible = false;
        state.language_chart.destroy();
        state.stars_chart.destroy();

        Ok(())
    }

    async fn render_profile(
        &self,
        profile: &UserProfile,
        total_stars: u64,
        repositories: &[Repository],
    ) -> StdResult<()> {
        let mut state = self.state.lock().await;
        let out = &mut state.out;
        writeln!(out)?;
        writeln!(out, "== {} (@{}) ==", profile.display_name(), profile.login)?;
        writeln!(out, "{}", profile.display_bio())?;
        if let Some(created_at) = profile.created_at {
            writeln!(out, "Joined {}", created_at.format("%Y-%m-%d"))?;
        }
        writeln!(out, "Profile: {}", profile.html_url)?;
        if !profile.avatar_url.is_empty() {
            writeln!(out, "Avatar: {}", profile.avatar_url)?;
        }

        let counters = [
            u64::from(profile.public_repos),
            u64::from(profile.followers),
            u64::from(profile.following),
            total_stars,
        ];
        match self.counters.filter(|settings| settings.frames > 0) {
            Some(settings) => {
                let frames = counters.map(|target| {
                    CounterAnimation::new(target, settings.duration).frames(settings.frames)
                });
                let frame_delay = settings.duration / settings.frames;
                for frame in 0..settings.frames as usize {
                    if frame > 0 {
                        sleep(frame_delay).await;
                    }
                    write!(out, "\r{}", stats_line(frames.each_ref().map(|f| f[frame])))?;
                    out.flush()?;
                }
                writeln!(out)?;
            }
            None => writeln!(out, "{}", stats_line(counters))?,
        }

        writeln!(out, "Top repositories:")?;
        if repositories.is_empty() {
            writeln!(out, "  No public repositories")?;
        }
        for repository in repositories {
            write_repository(out, repository)?;
        }
        out.flush()?;
        state.profile_visible = true;

        Ok(())
    }

    async fn render_charts(
        &self,
        languages: &[LanguageCount],
        ranking: &[RankedRepository],
    ) -> StdResult<()> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let language_chart = state
            .language_chart
            .redraw(|| LanguageChart::try_new(languages))?;
        draw_language_chart(&mut state.out, language_chart)?;
        let stars_chart = state
            .stars_chart
            .redraw(|| Ok::<_, anyhow::Error>(StarsChart::new(ranking)))?;
        draw_stars_chart(&mut state.out, stars_chart)?;
        state.out.flush()?;

        Ok(())
    }
}
