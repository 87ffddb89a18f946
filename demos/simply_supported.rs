use beam_core::capacity::FailureLimits;
use beam_core::loads::{DistributedLoad, PointLoad};
use beam_core::physics::Support;
use beam_core::section::BeamSection;
use beam_core::session::save_diagram_csv;
use beam_core::types::units::*;
use beam_core::AnalysisSession;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 4 m beam, 400 x 200 mm, cracked 100 mm deep at midspan
    let session = AnalysisSession::builder()
        .beam(BeamSection::new(
            Length::new::<meter>(4.0),
            Length::new::<millimeter>(400.0),
            Length::new::<millimeter>(200.0),
        )?)
        .support(Support::pin(0.0))
        .support(Support::roller(4.0))
        .point_load(PointLoad::new(Length::new::<meter>(2.0), Force::new::<kilonewton>(10.0)))
        .distributed_load(DistributedLoad::from_raw(0.0, 4.0, 1.5))
        .crack(Length::new::<meter>(2.0), Length::new::<millimeter>(100.0))
        .limits(FailureLimits::new(
            Pressure::new::<megapascal>(3.0),
            Pressure::new::<megapascal>(30.0),
            Pressure::new::<megapascal>(4.0),
        )?)
        .build()?;

    println!("{}", session.summary());

    let x = Length::new::<meter>(2.0);
    let scan = session.assess_section(x, 21)?;
    let worst = scan.critical();
    println!(
        "Critical fiber at x = {:.2} m: y = {:.3} m, sxx = {:.3} MPa, txy = {:.3} MPa, utilization {:.2}",
        worst.x, worst.y, worst.stress.sigma_xx, worst.stress.tau_xy, worst.utilization
    );
    match session.verdict_at(x, Length::new::<meter>(worst.y), Length::new::<meter>(0.0))? {
        verdict if verdict.is_safe() => println!("Section is safe"),
        verdict => println!("Section fails: {:?}", verdict.modes()),
    }

    save_diagram_csv("simply_supported_diagram.csv", &session.sample_diagrams(81))?;
    println!("Wrote simply_supported_diagram.csv");

    Ok(())
}
