use serde::{Deserialize, Serialize};

use crate::chart::{BirthData, ChartAssembler, NatalChart};
use crate::ephemeris::Ephemeris;
use crate::error::AstroError;
use crate::horoscope::narrative::NarrativeGenerator;
use crate::horoscope::prompts::natal_horoscope_prompt;
use crate::interpretation::{Interpretation, Interpreter};

/// Chart, interpretation and narrative for one birth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoroscopeOutput {
    pub chart: NatalChart,
    pub interpretation: Interpretation,
    pub narrative_text: String,
}

/// Runs chart assembly, interpretation and narrative generation in sequence
pub struct HoroscopeGenerator<E, N> {
    assembler: ChartAssembler<E>,
    interpreter: Interpreter,
    narrator: N,
}

impl<E: Ephemeris, N: NarrativeGenerator> HoroscopeGenerator<E, N> {
    pub fn new(ephemeris: E, narrator: N) -> Self {
        Self::with_parts(ChartAssembler::new(ephemeris), Interpreter::standard(), narrator)
    }

    pub fn with_parts(assembler: ChartAssembler<E>, interpreter: Interpreter, narrator: N) -> Self {
        Self {
            assembler,
            interpreter,
            narrator,
        }
    }

    pub fn assembler(&self) -> &ChartAssembler<E> {
        &self.assembler
    }

    pub fn narrator(&self) -> &N {
        &self.narrator
    }

    pub async fn generate_horoscope(&self, birth: &BirthData) -> Result<HoroscopeOutput, AstroError> {
        let chart = self.assembler.calculate_chart(birth)?;
        let interpretation = self.interpreter.interpret(&chart);
        let prompt = natal_horoscope_prompt(&chart)?;

        log::debug!("Requesting narrative ({} byte prompt)", prompt.len());
        let narrative_text = self.narrator.generate_text(&prompt).await.map_err(|e| {
            log::warn!("Narrative generation failed: {e}");
            AstroError::from(e)
        })?;

        Ok(HoroscopeOutput {
            chart,
            interpretation,
            narrative_text,
        })
    }
}

/// One-shot horoscope with default settings and the standard rule book
pub async fn generate_horoscope<E, N>(
    ephemeris: &E,
    narrator: &N,
    birth: &BirthData,
) -> Result<HoroscopeOutput, AstroError>
where
    E: Ephemeris,
    N: NarrativeGenerator,
{
    HoroscopeGenerator::new(ephemeris, narrator)
        .generate_horoscope(birth)
        .await
}
