use crate::print_json;
use crate::wiring::App;
use anyhow::{bail, Result};
use clap::Args;
use farmer_profile_store::Profile;
use farmer_sync::{ControllerState, ProfileController, SyncFlow};
use serde::Serialize;

/// Optional profile fields shared by `register` and `edit`
#[derive(Args, Debug, Default)]
pub(crate) struct ProfileFields {
    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    village: Option<String>,

    #[arg(long)]
    district: Option<String>,

    #[arg(long)]
    state: Option<String>,

    /// Crops grown (comma-separated or repeated); replaces the current list
    #[arg(long = "crop", value_delimiter = ',')]
    crops: Vec<String>,

    #[arg(long)]
    land_acres: Option<f64>,

    /// Preferred language code, e.g. `hi`, `kn`
    #[arg(long)]
    language: Option<String>,
}

impl ProfileFields {
    /// Overwrite only the fields that were given
    fn apply(self, profile: &mut Profile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(village) = self.village {
            profile.village = village;
        }
        if let Some(district) = self.district {
            profile.district = district;
        }
        if let Some(state) = self.state {
            profile.state = state;
        }
        let crops: Vec<String> = self
            .crops
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if !crops.is_empty() {
            profile.crops = crops;
        }
        if self.land_acres.is_some() {
            profile.land_acres = self.land_acres;
        }
        if self.language.is_some() {
            profile.preferred_language = self.language;
        }
    }
}

#[derive(Serialize)]
struct FlowOutput<'a> {
    flow: SyncFlow,
    user_id: &'a str,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<Profile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Print the controller's view of the flow that just ran; a failed flow is
/// also a failed process.
fn report_flow(user_id: &str, flow: SyncFlow, state: ControllerState) -> Result<()> {
    let ok = state.last_success.unwrap_or(false);
    let error = state.error.clone();
    print_json(&FlowOutput {
        flow,
        user_id,
        ok,
        profile: state.profile,
        error: state.error,
    })?;
    if !ok {
        bail!(
            "{flow} failed for {user_id}: {}",
            error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

async fn controller(app: &App) -> Result<ProfileController> {
    Ok(ProfileController::new(app.sync_manager().await?))
}

pub(crate) async fn run_login(app: &App, user_id: &str) -> Result<()> {
    let controller = controller(app).await?;
    controller.login(user_id).await;
    report_flow(user_id, SyncFlow::Login, controller.state())
}

pub(crate) async fn run_register(
    app: &App,
    user_id: String,
    phone: String,
    fields: ProfileFields,
) -> Result<()> {
    let mut profile = Profile::new(user_id.clone(), phone);
    fields.apply(&mut profile);

    let controller = controller(app).await?;
    controller.register(profile).await;
    report_flow(&user_id, SyncFlow::Registration, controller.state())
}

pub(crate) async fn run_edit(
    app: &App,
    user_id: &str,
    phone: Option<String>,
    fields: ProfileFields,
) -> Result<()> {
    let manager = app.sync_manager().await?;
    let Some(mut profile) = manager.get_local_profile(user_id).await else {
        bail!("No local profile for {user_id}; run `farmer login {user_id}` first");
    };
    if let Some(phone) = phone {
        profile.phone_number = phone;
    }
    fields.apply(&mut profile);

    let controller = ProfileController::new(manager);
    controller.edit(profile).await;
    report_flow(user_id, SyncFlow::Edit, controller.state())
}

pub(crate) async fn run_logout(app: &App, user_id: &str) -> Result<()> {
    let controller = controller(app).await?;
    controller.logout(user_id).await;
    report_flow(user_id, SyncFlow::Logout, controller.state())
}

pub(crate) async fn run_force_sync(app: &App, user_id: &str) -> Result<()> {
    let controller = controller(app).await?;
    controller.refresh(user_id).await;
    report_flow(user_id, SyncFlow::ForceSync, controller.state())
}

pub(crate) async fn run_exists(app: &App, user_id: &str) -> Result<()> {
    let controller = controller(app).await?;
    let exists = controller.check_registered(user_id).await;

    #[derive(Serialize)]
    struct Output<'a> {
        user_id: &'a str,
        exists: bool,
    }
    print_json(&Output { user_id, exists })
}

pub(crate) async fn run_show(
    app: &App,
    user_id: Option<&str>,
    phone: Option<&str>,
) -> Result<()> {
    let manager = app.sync_manager().await?;
    let profile = match (user_id, phone) {
        (Some(user_id), _) => manager.get_local_profile(user_id).await,
        (None, Some(phone)) => manager.get_local_profile_by_phone(phone).await,
        (None, None) => bail!("either --user-id or --phone is required"),
    };

    #[derive(Serialize)]
    struct Output {
        found: bool,
        profile: Option<Profile>,
    }
    print_json(&Output {
        found: profile.is_some(),
        profile,
    })
}

pub(crate) async fn run_clear_local(app: &App, user_id: &str) -> Result<()> {
    let manager = app.sync_manager().await?;
    let cleared = manager.clear_local_data(user_id).await;

    #[derive(Serialize)]
    struct Output<'a> {
        user_id: &'a str,
        cleared: bool,
    }
    print_json(&Output { user_id, cleared })?;
    if !cleared {
        bail!("Failed to clear local data for {user_id}");
    }
    Ok(())
}
