use std::env;

use regionview::Region;
use regionview::interval::Interval;
use regionview::scale;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let width = env::args()
        .nth(1)
        .map(|s| s.parse::<f64>())
        .transpose()?
        .unwrap_or(800.0);

    let padding = env::args()
        .nth(2)
        .map(|s| s.parse::<u64>())
        .transpose()?
        .unwrap_or(75);

    // The coding exons of PCSK9 (GRCh37).
    let exons = [
        "1-55505511-55505717",
        "1-55509516-55509708",
        "1-55512222-55512338",
        "1-55517959-55518116",
        "1-55521664-55521840",
        "1-55523731-55523855",
    ]
    .iter()
    .map(|s| s.parse::<Region>())
    .collect::<Result<Vec<_>, _>>()?;

    let intervals = exons
        .iter()
        .map(|exon| exon.interval().clone())
        .collect::<Vec<Interval>>();

    let scale = scale::Builder::default()
        .padding(padding)
        .width(width)
        .try_build_from(&intervals)?;

    let mut builder = Builder::default();
    builder.push_record(["Domain", "--", "-->", "Pixels", "--", "-->"]);
    builder.push_record(["Start", "Stop", "Size", "Left", "Right", "Width"]);

    for interval in scale.domain().intervals().iter() {
        let left = scale.base_start(interval.start());
        let right = scale.position(interval.stop());

        builder.push_record([
            interval.start().to_string(),
            interval.stop().to_string(),
            interval.size().to_string(),
            format!("{left:.2}"),
            format!("{right:.2}"),
            format!("{:.2}", right - left),
        ]);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    println!("{}", table);
    println!("{:.4} pixels per base", scale.pixels_per_base());

    Ok(())
}
