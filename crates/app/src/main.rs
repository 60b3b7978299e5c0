//! `armeria` command-line entry point.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use armeria_app::{Loadable, NavBar, Settings, Shell, WeaponActions};
use armeria_auth::{AuthContext, GuardDecision, Role, Route};
use armeria_client::{
    ApiClient, Category, ClientConfig, Condition, Credentials, NewUser, NewWeapon, UserUpdate,
    Weapon, WeaponPatch,
};
use armeria_core::{UserId, WeaponId};
use armeria_observability::LogFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "armeria", about = "Armería inventory client")]
struct Cli {
    #[arg(long, env = "ARMERIA_API_URL", default_value = armeria_client::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Session record location (defaults to the platform data directory).
    #[arg(long, env = "ARMERIA_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[arg(long, env = "ARMERIA_LOG_FORMAT", default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with name and password.
    Login {
        #[arg(long)]
        name: String,
        #[arg(long, env = "ARMERIA_PASSWORD")]
        password: String,
    },
    /// Browse as a guest.
    Guest,
    Logout,
    /// Show the current session and navigation bar.
    Whoami,
    /// Ask the route guard about a path.
    Open { path: String },
    Armas(ArmasCommand),
    Usuarios(UsuariosCommand),
}

#[derive(Args, Debug)]
struct ArmasCommand {
    #[command(subcommand)]
    command: ArmasSubcommand,
}

#[derive(Subcommand, Debug)]
enum ArmasSubcommand {
    List,
    Get {
        id: WeaponId,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        category: CategoryArg,
        #[arg(long, value_enum)]
        condition: ConditionArg,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        id: WeaponId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_enum)]
        category: Option<CategoryArg>,
        #[arg(long, value_enum)]
        condition: Option<ConditionArg>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: WeaponId,
        /// The weapon's name, typed again to confirm.
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Args, Debug)]
struct UsuariosCommand {
    #[command(subcommand)]
    command: UsuariosSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsuariosSubcommand {
    List,
    Register {
        #[arg(long)]
        name: String,
        #[arg(long, env = "ARMERIA_NEW_PASSWORD")]
        password: String,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    Update {
        id: UserId,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        role: Option<RoleArg>,
    },
    Delete {
        id: UserId,
        /// The user's name, typed again to confirm.
        #[arg(long)]
        confirm: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CategoryArg {
    Firearm,
    Blade,
    Explosive,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Firearm => Category::Firearm,
            CategoryArg::Blade => Category::Blade,
            CategoryArg::Explosive => Category::Explosive,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ConditionArg {
    New,
    Used,
}

impl From<ConditionArg> for Condition {
    fn from(value: ConditionArg) -> Self {
        match value {
            ConditionArg::New => Condition::New,
            ConditionArg::Used => Condition::Used,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    User,
    Admin,
}

impl From<RoleArg> for Role {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::User => Role::User,
            RoleArg::Admin => Role::Admin,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings {
        api: ClientConfig::new(cli.base_url),
        session_file: cli.session_file,
        log_format: cli.log_format,
    };
    armeria_observability::init(settings.log_format);

    let auth = Arc::new(AuthContext::new(settings.session_store()));
    let shell = Shell::new(auth, ApiClient::new(settings.api.clone()));
    shell.start();

    run(&shell, cli.command).await
}

async fn run(shell: &Shell, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Login { name, password } => {
            let next = shell
                .sign_in(&Credentials::new(name, password))
                .await
                .context("login failed")?;
            println!("signed in as {}; continue at {next}", shell.session().role().label());
        }
        Command::Guest => {
            let next = shell.enter_as_guest();
            println!("browsing as guest; continue at {next}");
        }
        Command::Logout => {
            let next = shell.sign_out();
            println!("signed out; continue at {next}");
        }
        Command::Whoami => {
            let session = shell.session();
            let bar = NavBar::for_session(&session);
            let links: Vec<String> = bar
                .links
                .iter()
                .map(|l| format!("{} ({})", l.label, l.route))
                .collect();
            println!("rol: {}", bar.role_label);
            println!("links: {}", links.join(", "));
            println!("action: {}", bar.action.label());
        }
        Command::Open { path } => {
            let (route, decision) = shell.open(&path);
            match decision {
                GuardDecision::Pending => println!("{route}: pending"),
                GuardDecision::Render => println!("{route}: render"),
                GuardDecision::Redirect(to) => println!("{route}: redirect to {to}"),
            }
        }
        Command::Armas(cmd) => run_armas(shell, cmd.command).await?,
        Command::Usuarios(cmd) => run_usuarios(shell, cmd.command).await?,
    }
    Ok(())
}

async fn run_armas(shell: &Shell, command: ArmasSubcommand) -> anyhow::Result<()> {
    let api = shell.api();

    match command {
        ArmasSubcommand::List => {
            let session = shell.enter(&Route::Home)?;
            let mut page = Loadable::default();
            shell.load_weapons(&mut page).await?;
            if let Some(err) = page.error() {
                anyhow::bail!("{err}");
            }
            let actions = WeaponActions::for_role(session.role());
            for w in page.data() {
                print_weapon(w);
            }
            if actions.create {
                println!("({} weapons; `armas create` to add one)", page.data().len());
            }
        }
        ArmasSubcommand::Get { id } => {
            let session = shell.enter(&Route::WeaponDetail(id.clone()))?;
            let weapon = api.get_weapon(&id, session.token()).await?;
            print_weapon(&weapon);
            if !weapon.description.is_empty() {
                println!("    {}", weapon.description);
            }
        }
        ArmasSubcommand::Create {
            name,
            category,
            condition,
            description,
        } => {
            let session = shell.enter(&Route::CreateWeapon)?;
            let new = NewWeapon::new(name, category.into(), condition.into(), description)?;
            let created = api.create_weapon(&new, session.token()).await?;
            println!("created {}", created.id);
        }
        ArmasSubcommand::Update {
            id,
            name,
            category,
            condition,
            description,
        } => {
            let session = shell.enter(&Route::EditWeapon(id.clone()))?;
            let patch = WeaponPatch {
                name,
                category: category.map(Into::into),
                description,
                condition: condition.map(Into::into),
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update");
            }
            let updated = api.update_weapon(&id, &patch, session.token()).await?;
            print_weapon(&updated);
        }
        ArmasSubcommand::Delete { id, confirm } => {
            let mut page = Loadable::default();
            shell.load_weapons(&mut page).await?;
            if let Some(err) = page.error() {
                anyhow::bail!("{err}");
            }
            shell.delete_weapon(&mut page, &id, &confirm).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

async fn run_usuarios(shell: &Shell, command: UsuariosSubcommand) -> anyhow::Result<()> {
    let api = shell.api();

    match command {
        UsuariosSubcommand::List => {
            let mut page = Loadable::default();
            shell.load_users(&mut page).await?;
            if let Some(err) = page.error() {
                anyhow::bail!("{err}");
            }
            for u in page.data() {
                let role = u.role.map_or("-", |r| r.label());
                println!("{}  {}  {}", u.id, u.name, role);
            }
        }
        UsuariosSubcommand::Register {
            name,
            password,
            role,
        } => {
            let session = shell.enter(&Route::Register)?;
            let new = NewUser::new(name, password, role.map(Into::into))?;
            api.register_user(&new, session.token()).await?;
            println!("user created");
        }
        UsuariosSubcommand::Update { id, name, role } => {
            let session = shell.enter(&Route::EditUser(id.clone()))?;
            let update = UserUpdate {
                name,
                role: role.map(Into::into),
            };
            let user = api.update_user(&id, &update, session.token()).await?;
            println!("updated {} ({})", user.id, user.name);
        }
        UsuariosSubcommand::Delete { id, confirm } => {
            let mut page = Loadable::default();
            shell.load_users(&mut page).await?;
            if let Some(err) = page.error() {
                anyhow::bail!("{err}");
            }
            shell.delete_user(&mut page, &id, &confirm).await?;
            println!("deleted {id}");
        }
    }
    Ok(())
}

fn print_weapon(w: &Weapon) {
    println!(
        "{}  {}  [{} / {}]  by {}",
        w.id,
        w.name,
        w.category.label(),
        w.condition.label(),
        w.creator_name().unwrap_or("-")
    );
}
