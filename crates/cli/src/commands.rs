//! Command handlers.  Each resource command is written once, generic over
//! [`Resource`], and dispatched on the runtime [`ResourceKind`].

use anyhow::{anyhow, bail, Context as _};

use cms_client::screens::{EditorScreen, ListingScreen, Redirect, SubmitOutcome};
use cms_client::{ClientConfig, CmsApi, SessionStore};
use cms_core::notice::Notice;
use cms_core::query::ListQuery;
use cms_core::resource::{Record, Resource};
use cms_core::resources::banner::Banners;
use cms_core::resources::gallery::Galleries;
use cms_core::resources::gallery_category::{GalleryCategories, ACTIVE_ONLY};
use cms_core::resources::news::News;
use cms_core::resources::org_structure::OrganizationStructure;
use cms_core::resources::publication::Publications;
use cms_core::resources::slider::HomeSlider;
use cms_core::resources::team::Team;
use cms_core::resources::user::Users;
use cms_core::resources::youtube::YouTubeVideos;
use cms_core::resources::ResourceKind;
use cms_core::route::Route;
use cms_core::session::Access;

use crate::args::{EditArgs, ListArgs};

pub struct Context {
    pub api: CmsApi,
    pub store: SessionStore,
    pub config: ClientConfig,
    pub json: bool,
}

/// Bind `$r` to the resource type for `$kind` and evaluate `$body`.
macro_rules! with_resource {
    ($kind:expr, $r:ident => $body:expr) => {
        match $kind {
            ResourceKind::Banner => {
                type $r = Banners;
                $body
            }
            ResourceKind::Gallery => {
                type $r = Galleries;
                $body
            }
            ResourceKind::GalleryCategory => {
                type $r = GalleryCategories;
                $body
            }
            ResourceKind::News => {
                type $r = News;
                $body
            }
            ResourceKind::OrganizationStructure => {
                type $r = OrganizationStructure;
                $body
            }
            ResourceKind::Publication => {
                type $r = Publications;
                $body
            }
            ResourceKind::HomeSlider => {
                type $r = HomeSlider;
                $body
            }
            ResourceKind::TeamMember => {
                type $r = Team;
                $body
            }
            ResourceKind::User => {
                type $r = Users;
                $body
            }
            ResourceKind::YouTubeVideo => {
                type $r = YouTubeVideos;
                $body
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

pub async fn login(ctx: &Context, email: &str, password: Option<String>) -> anyhow::Result<()> {
    let Some(password) = password else {
        bail!("No password given. Pass --password or set CMS_PASSWORD.");
    };
    let token = ctx
        .api
        .login(email, &password)
        .await
        .map_err(|e| anyhow!("Sign-in failed: {}", e.user_message()))?;
    ctx.store.sign_in(token);
    ctx.store.save(&ctx.config.session_file).await?;
    eprintln!("Signed in as {email}.");
    Ok(())
}

pub async fn logout(ctx: &Context) -> anyhow::Result<()> {
    ctx.store.sign_out();
    ctx.store.save(&ctx.config.session_file).await?;
    eprintln!("Signed out.");
    Ok(())
}

pub fn status(ctx: &Context) -> anyhow::Result<()> {
    let signed_in = matches!(ctx.store.guard(), Access::Granted(_));
    if ctx.json {
        let status = serde_json::json!({
            "apiUrl": ctx.api.api_url(),
            "signedIn": signed_in,
            "sessionFile": ctx.config.session_file.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("Backend:   {}", ctx.api.api_url());
        println!("Signed in: {}", if signed_in { "yes" } else { "no" });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Resource commands
// ---------------------------------------------------------------------------

pub async fn list(ctx: &Context, args: &ListArgs) -> anyhow::Result<()> {
    with_resource!(args.resource.0, R => list_resource::<R>(ctx, args).await)
}

pub async fn show(ctx: &Context, kind: ResourceKind, id: &str) -> anyhow::Result<()> {
    with_resource!(kind, R => show_resource::<R>(ctx, id).await)
}

pub async fn save(
    ctx: &Context,
    kind: ResourceKind,
    id: Option<&str>,
    edit: &EditArgs,
) -> anyhow::Result<()> {
    if kind == ResourceKind::Gallery {
        return save_gallery(ctx, id, edit).await;
    }
    with_resource!(kind, R => save_resource::<R>(ctx, id, edit).await)
}

pub async fn delete(ctx: &Context, kind: ResourceKind, id: &str, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        bail!("Refusing to delete {} {id} without --yes.", kind.as_str());
    }
    with_resource!(kind, R => delete_resource::<R>(ctx, id).await)
}

async fn list_resource<R: Resource>(ctx: &Context, args: &ListArgs) -> anyhow::Result<()> {
    let limit = args.limit.unwrap_or_else(|| ctx.config.limit(R::PAGE_SIZE));
    let mut screen =
        ListingScreen::<R>::mount(ctx.api.clone(), &ctx.store, limit).map_err(redirected)?;
    if args.active_only {
        screen = screen.with_query(ACTIVE_ONLY.0, ACTIVE_ONLY.1);
    }
    screen
        .load(args.page)
        .await
        .map_err(|e| anyhow!("Failed to load {}: {}", R::ROUTE, e.user_message()))?;

    let rows = screen.view(&list_query::<R>(args));
    let listing = screen.listing();

    if ctx.json {
        let out = serde_json::json!({
            "items": rows,
            "currentPage": listing.current_page(),
            "totalPages": listing.total_pages(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No {} found.", R::LABEL.to_lowercase());
    }
    for row in &rows {
        println!("{}", format_row(*row));
    }
    println!(
        "-- page {} of {} ({} shown)",
        listing.current_page(),
        listing.total_pages(),
        rows.len()
    );
    Ok(())
}

async fn show_resource<R: Resource>(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let credentials = match ctx.store.guard() {
        Access::Granted(credentials) => credentials,
        Access::Redirect(to) => return Err(redirected(Redirect { to, notice: None })),
    };
    let record = ctx
        .api
        .fetch::<R>(&credentials, id)
        .await
        .map_err(|e| anyhow!("Failed to load {} {id}: {}", R::LABEL.to_lowercase(), e.user_message()))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// Local filter and order for a listing.  `--sort` wins over the
/// resource's default order.
fn list_query<R: Resource>(args: &ListArgs) -> ListQuery {
    ListQuery {
        search: args.search.clone(),
        category: args.category.clone(),
        sort: args.sort.map(Into::into).or(R::DEFAULT_SORT),
    }
}

async fn save_resource<R: Resource>(
    ctx: &Context,
    id: Option<&str>,
    edit: &EditArgs,
) -> anyhow::Result<()> {
    let screen = EditorScreen::<R>::mount(ctx.api.clone(), &ctx.store, id)
        .await
        .map_err(redirected)?;
    submit_edits(ctx, screen, edit).await
}

/// Galleries only accept an active category, so the options are loaded
/// before the edits are applied.
async fn save_gallery(ctx: &Context, id: Option<&str>, edit: &EditArgs) -> anyhow::Result<()> {
    let mut screen = EditorScreen::<Galleries>::mount(ctx.api.clone(), &ctx.store, id)
        .await
        .map_err(redirected)?;
    screen
        .load_category_options()
        .await
        .map_err(|e| anyhow!("Failed to load gallery categories: {}", e.user_message()))?;
    submit_edits(ctx, screen, edit).await
}

async fn submit_edits<R: Resource>(
    ctx: &Context,
    mut screen: EditorScreen<R>,
    edit: &EditArgs,
) -> anyhow::Result<()> {
    for (field, value) in &edit.values {
        screen.set(field, value.as_str())?;
    }
    for (field, path) in &edit.files {
        screen
            .stage_file(field, path)
            .await
            .with_context(|| format!("Could not stage {} for '{field}'", path.display()))?;
    }

    match screen.submit().await? {
        SubmitOutcome::Saved {
            notice,
            navigate,
            response,
        } => {
            report(&notice);
            if ctx.json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            }
            tracing::debug!(to = %navigate, "Returning to listing");
            Ok(())
        }
        SubmitOutcome::Rejected { notice } => {
            report(&notice);
            bail!("{} was not saved.", R::LABEL)
        }
    }
}

async fn delete_resource<R: Resource>(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let mut screen =
        ListingScreen::<R>::mount(ctx.api.clone(), &ctx.store, ctx.config.limit(R::PAGE_SIZE))
            .map_err(redirected)?;
    screen.request_delete(id);
    let notice = screen.confirm_delete().await;
    report(&notice);
    if notice.is_error() {
        bail!("{} {id} was not deleted.", R::LABEL);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Output helpers
// ---------------------------------------------------------------------------

fn report(notice: &Notice) {
    eprintln!("{notice}");
}

fn redirected(redirect: Redirect) -> anyhow::Error {
    if let Some(notice) = &redirect.notice {
        report(notice);
    }
    match redirect.to {
        Route::Login => anyhow!("Not signed in. Run `cms login --email <email>` first."),
        to => anyhow!("Returned to {to}."),
    }
}

fn format_row<R: Record>(row: &R) -> String {
    let mut line = format!("{:<26} {}", row.id(), row.sort_key());
    if let Some(category) = row.category().filter(|c| !c.is_empty()) {
        line.push_str(&format!("  [{category}]"));
    }
    if row.is_active() == Some(false) {
        line.push_str("  (inactive)");
    }
    line
}
