use derive_builder::Builder;

/// Layout and labelling for one chart
///
/// # Example
///
/// ```rust
/// use bench_report::render::ChartOptions;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let options = ChartOptions::new()
///     .title("duckdb_write_modes")
///     .x_desc("Number of records")
///     .width(1200u32)
///     .build()?;
/// assert_eq!(options.height, 600);
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
#[builder(setter(into, strip_option), default)]
pub struct ChartOptions {
    /// Image width in pixels
    #[builder(default = "1200")]
    pub width: u32,

    /// Image height in pixels
    #[builder(default = "600")]
    pub height: u32,

    /// Margin around the chart in pixels
    #[builder(default = "20")]
    pub margin: u32,

    /// Size of the x-axis label area in pixels
    #[builder(default = "60")]
    pub x_label_area_size: u32,

    /// Size of the y-axis label area in pixels
    #[builder(default = "90")]
    pub y_label_area_size: u32,

    /// Chart caption
    pub title: String,

    /// X-axis description
    pub x_desc: Option<String>,

    /// Y-axis description
    #[builder(default = "\"Median time (s)\".to_string()")]
    pub y_desc: String,

    /// Caption font size
    #[builder(default = "28")]
    pub title_font_size: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 600,
            margin: 20,
            x_label_area_size: 60,
            y_label_area_size: 90,
            title: String::new(),
            x_desc: None,
            y_desc: "Median time (s)".to_string(),
            title_font_size: 28,
        }
    }
}

impl ChartOptions {
    /// Create a new builder for ChartOptions
    pub fn new() -> ChartOptionsBuilder {
        ChartOptionsBuilder::default()
    }
}
