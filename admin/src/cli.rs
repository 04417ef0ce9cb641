//! # Command Line Interface
//!
//! A thin presentation layer over the forms and views in [`crate::app`].
//! Every command maps to the route a browser user would open, and protected
//! routes are refused before any request when the session holds no valid
//! token.
//!
//! ```bash
//! marketplace-admin login -u ana@ifpb.edu.br -p secret123
//! marketplace-admin list advertisements --with-whatsapp --sort items
//! marketplace-admin show products 11
//! marketplace-admin delete rules 4 --yes
//! marketplace-admin rule add --title "No food" --description "Perishables are not allowed"
//! marketplace-admin profile edit --whatsapp "(83) 99988-7766"
//! marketplace-admin avatar set ./me.png
//! ```
//!
//! [`run`] returns the lines to print instead of writing them, so the binary
//! owns stdout and tests can assert on the output.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use shared::{format_phone, whatsapp_link, Advertisement, Category, Product, Rule, User};

use crate::app::feedback::Feedback;
use crate::app::filters::{
    total_items, whatsapp_count, AdvertisementFilter, AdvertisementSort, ListFilter,
    ProductFilter, RuleFilter, UserFilter,
};
use crate::app::forms::{FormState, LoginDraft, ProductDraft, ProfileDraft, RuleDraft, SubmitOutcome};
use crate::app::routes::Route;
use crate::app::views::{DetailState, DetailView, ListView};
use crate::core::error::{ApiError, AppError, Result};
use crate::core::service::{AuthService, ResourceApi};
use crate::services::api::{ApiClient, AvatarImage, Resource, ResourceClient};

#[derive(Parser, Debug)]
#[command(name = "marketplace-admin")]
#[command(about = "Administration client for the campus marketplace", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Mirror log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the session
    Login {
        /// Institutional e-mail
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// List a resource, filtered and sorted locally
    List(ListArgs),

    /// Show one entity
    Show {
        #[arg(value_enum)]
        resource: ResourceKind,

        id: i64,
    },

    /// Delete one entity
    Delete {
        #[arg(value_enum)]
        resource: ResourceKind,

        id: i64,

        /// Confirm the deletion; without it nothing is sent
        #[arg(long)]
        yes: bool,
    },

    /// Manage marketplace rules
    #[command(subcommand)]
    Rule(RuleCommand),

    /// Manage products
    #[command(subcommand)]
    Product(ProductCommand),

    /// Edit your own profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Change or remove an avatar image
    #[command(subcommand)]
    Avatar(AvatarCommand),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub resource: ResourceKind,

    /// Case-insensitive text search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Products only: restrict to one category (BOOK, UNIFORM, ...)
    #[arg(long)]
    pub category: Option<Category>,

    /// Advertisements only: display order
    #[arg(long, value_enum, default_value_t = SortArg::Recent)]
    pub sort: SortArg,

    /// Advertisements only: keep those with a WhatsApp contact
    #[arg(long)]
    pub with_whatsapp: bool,

    /// Advertisements only: keep those of the logged-in user
    #[arg(long)]
    pub mine: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Advertisements,
    Products,
    Rules,
    Users,
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortArg {
    #[default]
    Recent,
    Oldest,
    Items,
}

impl From<SortArg> for AdvertisementSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Recent => AdvertisementSort::MostRecent,
            SortArg::Oldest => AdvertisementSort::Oldest,
            SortArg::Items => AdvertisementSort::MostItems,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum RuleCommand {
    /// Create a rule
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Create the rule switched off
        #[arg(long)]
        inactive: bool,
    },

    /// Change an existing rule; omitted fields keep their value
    Edit {
        id: i64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        active: Option<bool>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProductCommand {
    /// Offer a product as the logged-in user
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        /// Decimal price, `5,50` or `5.50`
        #[arg(long)]
        price: String,

        #[arg(long, default_value = "1")]
        quantity: String,

        #[arg(long, default_value = "BOOK")]
        category: Category,

        #[arg(long)]
        for_exchange: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Change your details; omitted fields keep their value
    Edit {
        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        username: Option<String>,

        /// WhatsApp number, any formatting; an empty string removes it
        #[arg(long)]
        whatsapp: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AvatarCommand {
    /// Upload a JPEG, PNG or WebP image (5 MB at most)
    Set {
        file: PathBuf,

        /// Another user's id (admins); defaults to yourself
        #[arg(long)]
        user: Option<i64>,
    },

    /// Remove the avatar image
    Remove {
        #[arg(long)]
        user: Option<i64>,
    },
}

impl Commands {
    /// Route a browser user would open for the same action.
    pub fn route(&self) -> Option<Route> {
        let route = match self {
            Commands::Login { .. } => Route::Login,
            Commands::Logout | Commands::Whoami => return None,
            Commands::List(args) => list_route(args.resource),
            Commands::Delete { resource, .. } => list_route(*resource),
            Commands::Show { resource, id } => match resource {
                ResourceKind::Advertisements => Route::AdvertisementDetail(*id),
                ResourceKind::Products => Route::Products,
                ResourceKind::Rules => Route::RuleEdit(*id),
                ResourceKind::Users => Route::UserDetail(*id),
            },
            Commands::Rule(RuleCommand::Add { .. }) => Route::RuleNew,
            Commands::Rule(RuleCommand::Edit { id, .. }) => Route::RuleEdit(*id),
            Commands::Product(ProductCommand::Add { .. }) => Route::Products,
            Commands::Profile(_) => Route::Home,
            Commands::Avatar(AvatarCommand::Set { user, .. } | AvatarCommand::Remove { user }) => {
                user.map_or(Route::Home, Route::UserDetail)
            }
        };
        Some(route)
    }
}

fn list_route(resource: ResourceKind) -> Route {
    match resource {
        ResourceKind::Advertisements => Route::Advertisements,
        ResourceKind::Products => Route::Products,
        ResourceKind::Rules => Route::Rules,
        ResourceKind::Users => Route::Users,
    }
}

/// Execute one command and return the lines to print.
#[tracing::instrument(skip_all, fields(route = ?command.route()))]
pub async fn run(command: Commands, client: &ApiClient) -> Result<Vec<String>> {
    if let Some(route) = command.route() {
        if route.guard(client.session()) != route {
            return Err(ApiError::Unauthenticated.into());
        }
    }

    match command {
        Commands::Login { username, password } => {
            let mut form = FormState::create(LoginDraft { username, password });
            let outcome = form.submit_login(client).await;
            let landing = match &outcome {
                SubmitOutcome::Saved { navigate, .. } => *navigate,
                _ => Route::Login,
            };
            let user = outcome.into_result()?;
            tracing::info!(user_id = user.id, "Logged in");
            Ok(vec![
                format!("Logged in as {} <{}>", user.display_name(), user.username),
                format!("Start page: {landing}"),
            ])
        }
        Commands::Logout => {
            client.logout()?;
            Ok(vec!["Logged out".to_string()])
        }
        Commands::Whoami => {
            if !client.session().is_authenticated() {
                return Ok(vec!["Not logged in".to_string()]);
            }
            let user = client.me().await?;
            Ok(user.details())
        }
        Commands::List(args) => list(client, &args).await,
        Commands::Show { resource, id } => match resource {
            ResourceKind::Advertisements => show(client.advertisements(), id).await,
            ResourceKind::Products => show(client.products(), id).await,
            ResourceKind::Rules => show(client.rules(), id).await,
            ResourceKind::Users => show(client.users(), id).await,
        },
        Commands::Delete { resource, id, yes } => match resource {
            ResourceKind::Advertisements => {
                let api = client.advertisements();
                if yes {
                    ensure_can_modify(client, &api, id).await?;
                }
                delete(api, id, yes).await
            }
            ResourceKind::Products => {
                let api = client.products();
                if yes {
                    ensure_can_modify(client, &api, id).await?;
                }
                delete(api, id, yes).await
            }
            ResourceKind::Rules => delete(client.rules(), id, yes).await,
            ResourceKind::Users => delete(client.users(), id, yes).await,
        },
        Commands::Rule(RuleCommand::Add {
            title,
            description,
            inactive,
        }) => {
            let mut form = FormState::create(RuleDraft {
                title,
                description,
                active: !inactive,
            });
            let rule = form.submit(&client.rules()).await.into_result()?;
            Ok(vec![format!("Created rule {}", rule.row())])
        }
        Commands::Rule(RuleCommand::Edit {
            id,
            title,
            description,
            active,
        }) => {
            let rules = client.rules();
            let mut form = FormState::<RuleDraft>::load(&rules, id).await?;
            let draft = form.edit();
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(active) = active {
                draft.active = active;
            }
            let rule = form.submit(&rules).await.into_result()?;
            Ok(vec![format!("Updated rule {}", rule.row())])
        }
        Commands::Product(ProductCommand::Add {
            title,
            description,
            price,
            quantity,
            category,
            for_exchange,
        }) => {
            let owner_id = client.session().current_user().id().ok_or_else(|| {
                AppError::Validation("no stored profile, log in again".to_string())
            })?;
            let mut form = FormState::create(ProductDraft {
                title,
                description,
                price,
                quantity,
                category,
                for_exchange,
                owner_id,
            });
            let product = form.submit(&client.products()).await.into_result()?;
            Ok(vec![format!("Created product {}", product.row())])
        }
        Commands::Profile(ProfileCommand::Edit {
            full_name,
            username,
            whatsapp,
        }) => {
            let current = client.me().await?;
            let mut form = FormState::create(ProfileDraft::from_user(&current));
            let draft = form.edit();
            if let Some(full_name) = full_name {
                draft.full_name = full_name;
            }
            if let Some(username) = username {
                draft.username = username;
            }
            if let Some(whatsapp) = whatsapp {
                draft.whatsapp_number = whatsapp;
            }
            let user = form.submit_profile(client).await.into_result()?;
            let mut lines = vec!["Profile updated".to_string()];
            lines.extend(user.details());
            Ok(lines)
        }
        Commands::Avatar(AvatarCommand::Set { file, user }) => {
            let id = avatar_owner(client, user)?;
            let image = AvatarImage::read(&file).await?;
            let url = client.users().upload_avatar(id, image).await?;
            let mut lines = vec![format!("Avatar updated for user #{id}")];
            lines.extend(url);
            Ok(lines)
        }
        Commands::Avatar(AvatarCommand::Remove { user }) => {
            let id = avatar_owner(client, user)?;
            client.users().remove_avatar(id).await?;
            Ok(vec![format!("Avatar removed for user #{id}")])
        }
    }
}

/// Whose avatar to change: the given user, or the one logged in.
fn avatar_owner(client: &ApiClient, user: Option<i64>) -> Result<i64> {
    match user {
        Some(id) => Ok(id),
        None => client.session().current_user().id().ok_or_else(|| {
            AppError::Validation("no stored profile, log in again".to_string())
        }),
    }
}

/// One-line message for a failed command.
pub fn describe(error: &AppError) -> String {
    match Feedback::from(error) {
        Feedback::Redirect(route) => {
            format!("{error}. Run `marketplace-admin login` first ({route})")
        }
        Feedback::NotFound => error.to_string(),
        Feedback::Retry(message) => format!("{message}. Try again later"),
        Feedback::Notice(message) => message,
    }
}

async fn list(client: &ApiClient, args: &ListArgs) -> Result<Vec<String>> {
    match args.resource {
        ResourceKind::Products => {
            let view = fetch(client.products()).await?;
            let filter = ProductFilter {
                search: args.search.clone(),
                category: args.category,
            };
            Ok(rows(filter.apply(view.items())))
        }
        ResourceKind::Advertisements => {
            let advertiser = if args.mine {
                let id = client.session().current_user().id().ok_or_else(|| {
                    AppError::Validation("--mine needs a stored profile, log in again".to_string())
                })?;
                Some(id)
            } else {
                None
            };
            let view = fetch(client.advertisements()).await?;
            let filter = AdvertisementFilter {
                search: args.search.clone(),
                sort: args.sort.into(),
                with_whatsapp: args.with_whatsapp,
                advertiser,
            };
            let all = view.items();
            let mut lines = rows(filter.apply(all));
            lines.push(format!(
                "{} advertisements, {} with WhatsApp, {} products listed",
                all.len(),
                whatsapp_count(all),
                total_items(all)
            ));
            Ok(lines)
        }
        ResourceKind::Rules => {
            let view = fetch(client.rules()).await?;
            let filter = RuleFilter {
                search: args.search.clone(),
            };
            Ok(rows(filter.apply(view.items())))
        }
        ResourceKind::Users => {
            let view = fetch(client.users()).await?;
            let filter = UserFilter {
                search: args.search.clone(),
            };
            Ok(rows(filter.apply(view.items())))
        }
    }
}

async fn fetch<R: Resource>(api: ResourceClient<R>) -> Result<ListView<R>> {
    let mut view = ListView::<R>::new(Arc::new(api));
    view.load().await;
    if let Some(error) = view.failure().cloned() {
        return Err(error.into());
    }
    Ok(view)
}

async fn show<R>(api: ResourceClient<R>, id: i64) -> Result<Vec<String>>
where
    R: Resource,
    R::Entity: Render,
{
    let mut view = DetailView::<R>::new(Arc::new(api), id);
    match view.load().await {
        DetailState::Ready(entity) => Ok(entity.details()),
        DetailState::NotFound => Err(ApiError::NotFound.into()),
        DetailState::Error(error) => Err(error.clone().into()),
        DetailState::Loading => Ok(Vec::new()),
    }
}

async fn delete<R: Resource>(api: ResourceClient<R>, id: i64, confirmed: bool) -> Result<Vec<String>> {
    let mut view = ListView::<R>::new(Arc::new(api));
    view.request_delete(id);
    if !confirmed {
        view.cancel_delete();
        return Ok(vec![format!(
            "Nothing deleted. Pass --yes to delete {} #{id}",
            R::NAME
        )]);
    }

    if !view.confirm_delete().await {
        let error = view
            .failure()
            .cloned()
            .unwrap_or_else(|| ApiError::InvalidRequest("nothing to delete".to_string()));
        return Err(error.into());
    }

    let mut lines = vec![format!("Deleted {} #{id}", R::NAME)];
    if let Some(remaining) = view.state().data() {
        lines.push(format!("{} {} remaining", remaining.len(), R::NAME));
    }
    Ok(lines)
}

/// Entities that belong to one user.
trait Owned {
    fn owner_id(&self) -> Option<i64>;
}

impl Owned for Product {
    fn owner_id(&self) -> Option<i64> {
        self.user_id
    }
}

impl Owned for Advertisement {
    fn owner_id(&self) -> Option<i64> {
        self.advertiser_id()
    }
}

/// Only the owner or an admin may change an owned entity. A missing entity
/// passes, since deleting it again is harmless.
async fn ensure_can_modify<R>(client: &ApiClient, api: &ResourceClient<R>, id: i64) -> Result<()>
where
    R: Resource,
    R::Entity: Owned,
{
    let session = client.session();
    if session.is_admin() {
        return Ok(());
    }
    match api.get_by_id(id).await {
        Ok(entity) if session.is_owner(entity.owner_id()) => Ok(()),
        Ok(_) => Err(ApiError::Forbidden(format!(
            "only the owner or an admin can delete {} #{id}",
            R::NAME
        ))
        .into()),
        Err(ApiError::NotFound) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn rows<T: Render>(items: Vec<&T>) -> Vec<String> {
    if items.is_empty() {
        return vec!["No results".to_string()];
    }
    items.into_iter().map(|item| item.row()).collect()
}

/// Brazilian currency display, e.g. `R$ 5,50`.
fn format_price(value: f64) -> String {
    format!("R$ {value:.2}").replace('.', ",")
}

/// Text rendering of one entity.
trait Render {
    fn row(&self) -> String;

    fn details(&self) -> Vec<String> {
        vec![self.row()]
    }
}

impl Render for Product {
    fn row(&self) -> String {
        let exchange = if self.for_exchange { "  (exchange)" } else { "" };
        format!(
            "#{}  {}  {}  x{}  {}{}",
            self.id,
            self.title,
            format_price(self.price),
            self.quantity,
            self.category,
            exchange
        )
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![self.row(), self.description.clone()];
        if let Some(owner) = self.user_id {
            lines.push(format!("Owner: #{owner}"));
        }
        lines
    }
}

impl Render for Advertisement {
    fn row(&self) -> String {
        let contact = self.contact_number().map(format_phone).unwrap_or_default();
        format!(
            "#{}  {}  {} item(s)  {}  {}",
            self.id,
            self.description,
            self.products.len(),
            format_price(self.total_price()),
            contact
        )
        .trim_end()
        .to_string()
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Advertisement #{}", self.id),
            self.description.clone(),
        ];
        if let Some(advertiser) = &self.advertiser {
            lines.push(format!("Advertiser: {} (#{})", advertiser.display_name(), advertiser.id));
        }
        if let Some(created_at) = &self.created_at {
            lines.push(format!("Created: {created_at}"));
        }
        for product in &self.products {
            lines.push(format!("  {}", product.row()));
        }
        lines.push(format!("Total: {}", format_price(self.total_price())));
        if let Some(number) = self.contact_number() {
            let message = format!("Hello! I am interested in your advertisement: {}", self.description);
            lines.push(format!("WhatsApp: {}", format_phone(number)));
            if let Some(link) = whatsapp_link(number, Some(&message)) {
                lines.push(link);
            }
        }
        lines
    }
}

impl Render for Rule {
    fn row(&self) -> String {
        let state = if self.active { "active" } else { "inactive" };
        format!("#{}  [{}]  {}", self.id, state, self.title)
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![self.row(), self.description.clone()];
        if let Some(created_at) = &self.created_at {
            lines.push(format!("Created: {created_at}"));
        }
        lines
    }
}

impl Render for User {
    fn row(&self) -> String {
        let admin = if self.is_admin() { "  admin" } else { "" };
        format!(
            "#{}  {}  <{}>  {}{}",
            self.id,
            self.display_name(),
            self.username,
            self.enrollment_number.as_deref().unwrap_or("-"),
            admin
        )
    }

    fn details(&self) -> Vec<String> {
        let mut lines = vec![self.row()];
        if let Some(number) = self.whatsapp_number.as_deref() {
            lines.push(format!("WhatsApp: {}", format_phone(number)));
        }
        if !self.roles.is_empty() {
            lines.push(format!("Roles: {}", self.roles.join(", ")));
        }
        if let Some(img_url) = self.img_url.as_deref() {
            lines.push(format!("Avatar: {img_url}"));
        }
        lines
    }
}
