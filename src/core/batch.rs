use crate::core::estimator::PriceEstimator;
use crate::domain::model::{BuildingType, FormInput};
use crate::utils::error::Result;
use crate::utils::rate_limit::Throttle;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::time::Duration;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Deserialize)]
struct BatchInputRow {
    tip: Option<String>,
    sup: Option<String>,
    instr: Option<String>,
}

#[derive(Debug, Serialize)]
struct BatchOutputRow {
    tip: BuildingType,
    sup: f64,
    instr: bool,
    total_fee: u64,
}

/// 逐列估價：輸入欄位 `tip,sup,instr`（與表單相同的值），輸出附加 `total_fee`
pub fn run_batch<R: Read, W: Write>(estimator: &PriceEstimator, input: R, output: W) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut writer = csv::Writer::from_writer(output);
    let mut progress = Throttle::new(PROGRESS_INTERVAL);
    let mut count = 0;

    for row in reader.deserialize::<BatchInputRow>() {
        let row = row?;
        let form = FormInput {
            tip: row.tip,
            sup: row.sup,
            instr: row.instr,
        };
        let result = estimator.estimate(&form.to_request());

        writer.serialize(BatchOutputRow {
            tip: result.building_type,
            sup: result.area_square_meters,
            instr: result.include_instrumentation,
            total_fee: result.total_fee,
        })?;

        count += 1;
        progress.call(|| tracing::info!("📊 Estimated {} rows so far", count));
    }

    writer.flush()?;
    tracing::info!("✅ Batch finished: {} rows estimated", count);
    Ok(count)
}
