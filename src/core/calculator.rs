use crate::core::estimator::PriceEstimator;
use crate::domain::model::{EstimateResult, FormInput};
use crate::domain::ports::EstimateSink;
use crate::utils::error::Result;
use crate::utils::rate_limit::Debouncer;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// 把表單輸入接到估價器與輸出端。輸入經過 debounce，只有最後一次會被計算。
pub struct Calculator<S: EstimateSink + 'static> {
    estimator: Arc<PriceEstimator>,
    sink: Arc<S>,
    debouncer: Debouncer<FormInput>,
}

impl<S: EstimateSink + 'static> Calculator<S> {
    pub fn new(estimator: PriceEstimator, sink: S, debounce: Duration) -> Self {
        let estimator = Arc::new(estimator);
        let sink = Arc::new(sink);

        let debouncer = {
            let estimator = Arc::clone(&estimator);
            let sink = Arc::clone(&sink);
            Debouncer::new(debounce, move |input: FormInput| {
                if let Err(e) = publish(&estimator, sink.as_ref(), &input) {
                    tracing::error!("❌ Failed to display estimate: {}", e);
                }
            })
        };

        Self {
            estimator,
            sink,
            debouncer,
        }
    }

    /// 表單變動；必須在 tokio runtime 內呼叫
    pub fn on_input(&self, input: FormInput) {
        tracing::debug!("Form changed, recomputing in {:?}: {:?}", self.debouncer.window(), input);
        self.debouncer.call(input);
    }

    /// 不經 debounce 立即計算（頁面載入時的第一次計算）
    pub fn recompute_now(&self, input: &FormInput) -> Result<EstimateResult> {
        self.debouncer.cancel();
        publish(&self.estimator, self.sink.as_ref(), input)
    }

    /// 等待尚未觸發的計算完成
    pub async fn settle(&self) {
        if self.debouncer.is_pending() {
            tracing::debug!("Waiting for pending estimate");
        }
        self.debouncer.flush().await;
    }

    #[cfg(test)]
    fn sink(&self) -> &S {
        &self.sink
    }
}

fn publish<S: EstimateSink + ?Sized>(
    estimator: &PriceEstimator,
    sink: &S,
    input: &FormInput,
) -> Result<EstimateResult> {
    let result = estimator.estimate(&input.to_request());
    let summary = estimator.summarize(&result);
    sink.publish(&result, &summary)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::Summary;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSink {
        published: Mutex<Vec<(EstimateResult, Summary)>>,
    }

    impl EstimateSink for MockSink {
        fn publish(&self, result: &EstimateResult, summary: &Summary) -> Result<()> {
            self.published
                .lock()
                .unwrap()
                .push((*result, summary.clone()));
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_inputs_publish_once_with_final_state() {
        let calculator = Calculator::new(PriceEstimator::default(), MockSink::default(), DEFAULT_DEBOUNCE);

        calculator.on_input(FormInput::from_urlencoded("tip=casa&sup=1"));
        calculator.on_input(FormInput::from_urlencoded("tip=casa&sup=10"));
        calculator.on_input(FormInput::from_urlencoded("tip=bloc&sup=250"));
        calculator.settle().await;

        let published = calculator.sink().published.lock().unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0.total_fee, 5786);
        assert_eq!(published[0].1.details, "Bloc • 250 mp");
    }

    #[tokio::test(start_paused = true)]
    async fn test_recompute_now_bypasses_debounce() {
        let calculator = Calculator::new(PriceEstimator::default(), MockSink::default(), DEFAULT_DEBOUNCE);

        calculator.on_input(FormInput::from_urlencoded("tip=hala"));
        let result = calculator
            .recompute_now(&FormInput::from_urlencoded("tip=casa&instr=on"))
            .unwrap();
        assert_eq!(result.total_fee, 4490);

        tokio::time::sleep(DEFAULT_DEBOUNCE * 2).await;
        let published = calculator.sink().published.lock().unwrap();
        assert_eq!(published.len(), 1);
    }
}
