use mandelbrot_explorer::BASELINE_MAX_ITERATIONS;

const SCREEN_WIDTH: u32 = 1200;
const SCREEN_HEIGHT: u32 = 900;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let survey = mandelbrot_explorer::survey_home_view(
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        2.0 / f64::from(SCREEN_HEIGHT),
        BASELINE_MAX_ITERATIONS,
    )?;

    println!("Duration:   {:?}", survey.duration);
    println!(
        "Saturated:  {} of {} cells",
        survey.saturated_cells,
        u64::from(survey.width) * u64::from(survey.height)
    );
    println!("Escaped:    {} cells", survey.escaped_cells);

    Ok(())
}
