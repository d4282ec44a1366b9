use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::analysis::aggregate::{
    avg_house_value_bedrooms_gt_n, avg_house_value_high_density, avg_income_bedrooms_gt_n,
    avg_income_rooms_gt_3, avg_population_bedrooms_gt_n, avg_population_high_density,
};
use crate::analysis::stats::{compute_column_stats, income_mean};
use crate::analysis::AnalysisError;
use crate::data::model::{format_row, format_value, ColumnRole, Dataset};
use crate::state::Session;
use crate::ui::chart::{self, Figure};
use crate::ui::ChartSink;

const MAIN_MENU: &str = "
Choose Your Operation:

Menu:
1. Display Dataset - Preview
2. Show Column Names
3. Show Basic Information
4. Show and remove Missing Values or null values
5. Statistics: for all attributes in our dataset
6. Generalized Analysis
7. Visualizations
8. Exit
";

const ANALYSIS_MENU: &str = "
Choose Analytical Operation:
1. Income Mean
2. Average Population in Areas with Bedrooms > n
3. Average House Value in Areas with Bedrooms > n
4. Average Income in Areas with Bedrooms > n
5. Average Income of People with More Than 3 Rooms per Household
6. Average Population in Households with High Density (> 1000)
7. Average House Value in Households with High Density (> 1000)
8. Relation between Total Number of Bedrooms by Average Income - GRAPH
9. Relation between Statistical Operations of All Attributes - GRAPH
10. Back to Main Menu
";

const VISUALIZATION_MENU: &str = "
Choose Visualization:
1. Plot Income Mean
2. Plot Average Population in Areas with Bedrooms > n
3. Plot Average House Value in Areas with Bedrooms > n
4. Plot Income Mean vs Average Population
5. Plot Frequencies of Data for summary analysis
6. Plot Relation between Total Number of Bedrooms by Average Income
7. Plot Relation between Statistical Operations of All Attributes
8. Plot Income vs Population for Areas with Income > n
9. Back to Main Menu
";

/// What a submenu asks of the main loop when it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Back,
    /// Input ended.
    Quit,
}

// ---------------------------------------------------------------------------
// Menu controller
// ---------------------------------------------------------------------------

/// Interactive console loop over a [`Session`].
///
/// Generic over its input, output and chart sink so it can be scripted.
pub struct Menu<R, W, S> {
    session: Session,
    input: R,
    out: W,
    charts: S,
    preview_rows: usize,
}

impl<R: BufRead, W: Write, S: ChartSink> Menu<R, W, S> {
    pub fn new(session: Session, input: R, out: W, charts: S, preview_rows: usize) -> Self {
        Self {
            session,
            input,
            out,
            charts,
            preview_rows,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run the main menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        if let Some(msg) = &self.session.status_message {
            writeln!(self.out, "{msg}")?;
        }
        loop {
            self.out.write_all(MAIN_MENU.as_bytes())?;
            let Some(choice) = self.prompt("\nEnter your choice (1-8): ")? else {
                break;
            };
            match choice.as_str() {
                "1" => self.attempt(Self::display_preview)?,
                "2" => self.attempt(Self::show_column_names)?,
                "3" => self.attempt(Self::show_basic_info)?,
                "4" => self.attempt(Self::show_and_remove_missing)?,
                "5" => self.attempt(Self::show_statistics)?,
                "6" => {
                    if self.analysis_menu()? == Flow::Quit {
                        break;
                    }
                }
                "7" => {
                    if self.visualization_menu()? == Flow::Quit {
                        break;
                    }
                }
                "8" => {
                    writeln!(self.out, "Exiting the program.")?;
                    break;
                }
                _ => writeln!(self.out, "Invalid choice. Please enter a number from 1 to 8.")?,
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn analysis_menu(&mut self) -> Result<Flow> {
        loop {
            self.out.write_all(ANALYSIS_MENU.as_bytes())?;
            let Some(choice) = self.prompt("\nEnter your choice (1-10): ")? else {
                return Ok(Flow::Quit);
            };
            match choice.as_str() {
                "1" => self.attempt(|m| m.scalar("Income Mean", income_mean))?,
                "2" => self.attempt(|m| {
                    let n = m.read_bedrooms()?;
                    m.scalar(
                        &format!("Average Population in Areas with Bedrooms > {n}"),
                        |ds| avg_population_bedrooms_gt_n(ds, n as f64),
                    )
                })?,
                "3" => self.attempt(|m| {
                    let n = m.read_bedrooms()?;
                    m.scalar(
                        &format!("Average House Value in Areas with Bedrooms > {n}"),
                        |ds| avg_house_value_bedrooms_gt_n(ds, n as f64),
                    )
                })?,
                "4" => self.attempt(|m| {
                    let n = m.read_bedrooms()?;
                    m.scalar(
                        &format!("Average Income in Areas with Bedrooms > {n}"),
                        |ds| avg_income_bedrooms_gt_n(ds, n as f64),
                    )
                })?,
                "5" => self.attempt(|m| {
                    m.scalar(
                        "Average Income of People with More Than 3 Rooms per Household",
                        avg_income_rooms_gt_3,
                    )
                })?,
                "6" => self.attempt(|m| {
                    m.scalar(
                        "Average Population in Households with High Density (> 1000)",
                        avg_population_high_density,
                    )
                })?,
                "7" => self.attempt(|m| {
                    m.scalar(
                        "Average House Value in Households with High Density (> 1000)",
                        avg_house_value_high_density,
                    )
                })?,
                "8" => self.attempt(|m| m.plot(chart::income_vs_bedrooms_figure))?,
                "9" => self.attempt(|m| m.plot(chart::statistics_figure))?,
                "10" => return Ok(Flow::Back),
                _ => writeln!(self.out, "Invalid choice. Please enter a number from 1 to 10.")?,
            }
        }
    }

    fn visualization_menu(&mut self) -> Result<Flow> {
        loop {
            self.out.write_all(VISUALIZATION_MENU.as_bytes())?;
            let Some(choice) = self.prompt("\nEnter your choice (1-9): ")? else {
                return Ok(Flow::Quit);
            };
            match choice.as_str() {
                "1" => self.attempt(|m| m.plot(chart::income_mean_figure))?,
                "2" => self.attempt(|m| {
                    let n = m.read_bedrooms()?;
                    m.plot(|ds| chart::population_bedrooms_figure(ds, n as f64))
                })?,
                "3" => self.attempt(|m| {
                    let n = m.read_bedrooms()?;
                    m.plot(|ds| chart::house_value_bedrooms_figure(ds, n as f64))
                })?,
                "4" => self.attempt(|m| m.plot(chart::income_density_figure))?,
                "5" => self.attempt(|m| m.plot(chart::frequency_figure))?,
                "6" => self.attempt(|m| m.plot(chart::income_vs_bedrooms_figure))?,
                "7" => self.attempt(|m| m.plot(chart::statistics_figure))?,
                "8" => self.attempt(Self::income_population)?,
                "9" => return Ok(Flow::Back),
                _ => writeln!(self.out, "Invalid choice. Please enter a number from 1 to 9.")?,
            }
        }
    }

    // -- Actions --

    fn display_preview(&mut self) -> Result<()> {
        let ds = self.session.dataset()?;
        writeln!(
            self.out,
            "\nDisplaying Dataset Preview: {}",
            self.session.source.display()
        )?;
        writeln!(self.out, "\nColumn Names:\n{:?}", ds.column_names)?;
        let rows = ds.preview(self.preview_rows);
        writeln!(self.out, "\nFirst {} rows of the dataset:", rows.len())?;
        for row in rows {
            writeln!(self.out, "{}", format_row(row))?;
        }
        Ok(())
    }

    fn show_column_names(&mut self) -> Result<()> {
        let ds = self.session.dataset()?;
        writeln!(self.out, "\nColumn Names:\n{:?}", ds.column_names)?;
        Ok(())
    }

    fn show_basic_info(&mut self) -> Result<()> {
        let ds = self.session.dataset()?;
        writeln!(self.out, "\nBasic information about the dataset:")?;
        writeln!(self.out, "{}", ds.basic_info())?;
        writeln!(self.out, "\nPreview of the first 5 rows:")?;
        for row in ds.preview(5) {
            writeln!(self.out, "{}", format_row(row))?;
        }
        Ok(())
    }

    fn show_and_remove_missing(&mut self) -> Result<()> {
        let report = self.session.clean()?;
        write!(self.out, "\n{report}")?;
        writeln!(self.out, "Successfully removed missing values")?;
        Ok(())
    }

    fn show_statistics(&mut self) -> Result<()> {
        let ds = self.session.dataset()?;
        let report = compute_column_stats(ds, &ds.column_names)?;
        write!(self.out, "\n{report}")?;
        Ok(())
    }

    fn income_population(&mut self) -> Result<()> {
        {
            let ds = self.session.dataset()?;
            let incomes: Vec<String> = ds
                .role(ColumnRole::MedianIncome)
                .take(5)
                .map(format_value)
                .collect();
            writeln!(self.out, "Median Income [{}]", incomes.join(", "))?;
        }
        let threshold: f64 = self.read_number("Enter the income threshold: ", "income threshold")?;
        self.plot(|ds| chart::income_population_figure(ds, threshold))
    }

    // -- Helpers --

    fn scalar(
        &mut self,
        label: &str,
        compute: impl FnOnce(&Dataset) -> Result<f64, AnalysisError>,
    ) -> Result<()> {
        let value = compute(self.session.dataset()?)?;
        writeln!(self.out, "\n{label}: {value}")?;
        Ok(())
    }

    fn plot(&mut self, build: impl FnOnce(&Dataset) -> Result<Figure, AnalysisError>) -> Result<()> {
        let figure = build(self.session.dataset()?)?;
        self.charts.show(figure)
    }

    /// Run an action; failures other than console I/O are reported and the
    /// menu carries on.
    fn attempt(&mut self, action: impl FnOnce(&mut Self) -> Result<()>) -> Result<()> {
        match action(self) {
            Ok(()) => Ok(()),
            Err(e) if e.is::<std::io::Error>() => Err(e),
            Err(e)
                if matches!(
                    e.downcast_ref::<AnalysisError>(),
                    Some(AnalysisError::NoDataset)
                ) =>
            {
                writeln!(self.out, "{e}")?;
                Ok(())
            }
            Err(e) => {
                log::warn!("{e:#}");
                writeln!(self.out, "Error: {e:#}")?;
                Ok(())
            }
        }
    }

    fn read_bedrooms(&mut self) -> Result<i64> {
        self.read_number("Enter the number of bedrooms to check: ", "number of bedrooms")
    }

    fn read_number<T>(&mut self, prompt: &str, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let Some(text) = self.prompt(prompt)? else {
            bail!("no input for {what}");
        };
        text.parse::<T>()
            .with_context(|| format!("'{text}' is not a valid {what}"))
    }

    /// Print `text` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
