use uuid::Uuid;

use crate::chart::BirthData;
use crate::ephemeris::Ephemeris;
use crate::error::AstroError;
use crate::horoscope::generator::{HoroscopeGenerator, HoroscopeOutput};
use crate::horoscope::narrative::NarrativeGenerator;
use crate::store::{KeyValueStore, ProfileRepository, UserProfile};

/// Horoscope generated for a stored user
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalHoroscope {
    pub user_id: String,
    pub horoscope: HoroscopeOutput,
}

/// Generates horoscopes and keeps the profile and chart of each user
pub struct HoroscopeService<E, N, S> {
    generator: HoroscopeGenerator<E, N>,
    profiles: ProfileRepository<S>,
}

impl<E, N, S> HoroscopeService<E, N, S>
where
    E: Ephemeris,
    N: NarrativeGenerator,
    S: KeyValueStore,
{
    pub fn new(generator: HoroscopeGenerator<E, N>, store: S) -> Self {
        Self {
            generator,
            profiles: ProfileRepository::new(store),
        }
    }

    pub fn profiles(&self) -> &ProfileRepository<S> {
        &self.profiles
    }

    /// Anonymous horoscope; nothing is stored
    pub async fn generate(&self, birth: &BirthData) -> Result<HoroscopeOutput, AstroError> {
        self.generator.generate_horoscope(birth).await
    }

    /// Horoscope for a freshly allocated user id
    pub async fn generate_personal(&self, birth: BirthData) -> Result<PersonalHoroscope, AstroError> {
        let user_id = Uuid::new_v4().to_string();
        self.generate_for(user_id, birth).await
    }

    /// Horoscope for `user_id`. Chart and profile are saved only on success.
    pub async fn generate_for(
        &self,
        user_id: impl Into<String>,
        birth: BirthData,
    ) -> Result<PersonalHoroscope, AstroError> {
        let user_id = user_id.into();
        let horoscope = self.generator.generate_horoscope(&birth).await?;

        // Chart first: a stored profile always has its chart.
        self.profiles.save_chart(&user_id, &horoscope.chart)?;
        self.profiles.save_profile(&UserProfile {
            user_id: user_id.clone(),
            birth,
        })?;
        log::info!("Stored profile and chart for user {user_id}");

        Ok(PersonalHoroscope { user_id, horoscope })
    }
}
