//! CLI module for the shopctl console.
//!
//! Provides role-gated subcommands over the storefront API:
//! - `login` / `register` / `logout` / `whoami` - session management
//! - `requests ...` - replenishment requests (admin and warehouse consoles)
//! - `products ...` - catalog browsing and admin product management
//! - `cart ...` - the customer's shopping cart
//! - `orders ...` - order placement and processing
//! - `notifications ...` - notification inbox
//! - `dashboard` - role-specific stats
//!
//! Every protected command runs through the route guard first, so the
//! console denies or "redirects" exactly where the web UI would.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::types::{
    CartResponse, DashboardStats, Notification, Order, OrderStatus, PaymentStatus, Product,
    ProductFilter, ProductPayload, RequestOrder,
};
use crate::api::{ApiClient, Gateway, TokenStore};
use crate::config::Config;
use crate::guard::{self, RouteDecision};
use crate::session::{Role, SessionStore};
use crate::workflow::{can_fulfill, Decision, Queue, RequestOrderConsole};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "shopctl")]
#[command(author, version, about = "A role-aware console for the storefront API", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shopctl.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// API URL to connect to (overrides the config file)
    #[arg(long, env = "SHOPCTL_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and log straight in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Requested role (customer when omitted)
        #[arg(long)]
        role: Option<String>,
    },

    /// End the current session
    Logout,

    /// Show the current session
    Whoami,

    /// Stock replenishment requests
    #[command(subcommand)]
    Requests(RequestCommands),

    /// Product catalog
    #[command(subcommand)]
    Products(ProductCommands),

    /// Shopping cart
    #[command(subcommand)]
    Cart(CartCommands),

    /// Customer orders
    #[command(subcommand)]
    Orders(OrderCommands),

    /// Notification inbox
    #[command(subcommand)]
    Notifications(NotificationCommands),

    /// Role-specific dashboard stats
    Dashboard,
}

/// Requests subcommands
#[derive(Subcommand, Debug)]
pub enum RequestCommands {
    /// List request orders, optionally one queue only
    List {
        #[arg(long, value_enum)]
        queue: Option<QueueArg>,
    },
    /// Show one request order
    Show {
        /// Request order ID
        id: u64,
    },
    /// Create a replenishment request for a product
    Create {
        #[arg(long)]
        product: u64,
        #[arg(long)]
        quantity: u32,
    },
    /// Approve a request (admin decision)
    Approve {
        /// Request order ID
        id: u64,
    },
    /// Reject a request (admin decision)
    Reject {
        /// Request order ID
        id: u64,
    },
    /// Fulfill a request (warehouse decision)
    Fulfill {
        /// Request order ID
        id: u64,
    },
    /// Decline fulfillment (warehouse decision)
    Decline {
        /// Request order ID
        id: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum QueueArg {
    PendingAdmin,
    Ready,
    RejectedByAdmin,
    Processed,
}

impl From<QueueArg> for Queue {
    fn from(arg: QueueArg) -> Queue {
        match arg {
            QueueArg::PendingAdmin => Queue::PendingAdmin,
            QueueArg::Ready => Queue::ReadyForWarehouse,
            QueueArg::RejectedByAdmin => Queue::RejectedByAdmin,
            QueueArg::Processed => Queue::Processed,
        }
    }
}

/// Products subcommands
#[derive(Subcommand, Debug)]
pub enum ProductCommands {
    /// List products
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Show one product
    Show {
        /// Product ID
        id: u64,
    },
    /// Add a product to the catalog (admin)
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        quantity: u32,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        low_stock_threshold: Option<u32>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<u64>,
    },
    /// Update a product; omitted fields are left untouched (admin)
    Update {
        /// Product ID
        id: u64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        quantity: Option<u32>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        low_stock_threshold: Option<u32>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        category: Option<u64>,
    },
    /// Remove a product from the catalog (admin)
    Delete {
        /// Product ID
        id: u64,
    },
    /// List products at or below their low-stock threshold
    LowStock,
}

/// Cart subcommands
#[derive(Subcommand, Debug)]
pub enum CartCommands {
    /// Show the cart with line totals
    Show,
    /// Add a product to the cart
    Add {
        #[arg(long)]
        product: u64,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a cart item's quantity
    Update {
        /// Cart item ID
        id: u64,
        #[arg(long)]
        quantity: u32,
    },
    /// Remove a cart item
    Remove {
        /// Cart item ID
        id: u64,
    },
    /// Empty the cart
    Clear,
}

/// Orders subcommands
#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// List orders
    List,
    /// Show one order with its line items
    Show {
        /// Order ID
        id: u64,
    },
    /// Place an order for the current cart
    Create {
        #[arg(long, default_value = "cash")]
        payment_method: String,
        #[arg(long, default_value = "")]
        shipping_address: String,
    },
    /// List accepted payment methods
    PaymentMethods,
    /// Update an order's status
    SetStatus {
        /// Order ID
        id: u64,
        #[arg(value_enum)]
        status: OrderStatusArg,
    },
    /// Update an order's payment status
    SetPayment {
        /// Order ID
        id: u64,
        #[arg(value_enum)]
        status: PaymentStatusArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum OrderStatusArg {
    Pending,
    Approved,
    Delivered,
    Cancelled,
}

impl From<OrderStatusArg> for OrderStatus {
    fn from(arg: OrderStatusArg) -> OrderStatus {
        match arg {
            OrderStatusArg::Pending => OrderStatus::Pending,
            OrderStatusArg::Approved => OrderStatus::Approved,
            OrderStatusArg::Delivered => OrderStatus::Delivered,
            OrderStatusArg::Cancelled => OrderStatus::Cancelled,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PaymentStatusArg {
    Pending,
    Paid,
    Failed,
}

impl From<PaymentStatusArg> for PaymentStatus {
    fn from(arg: PaymentStatusArg) -> PaymentStatus {
        match arg {
            PaymentStatusArg::Pending => PaymentStatus::Pending,
            PaymentStatusArg::Paid => PaymentStatus::Paid,
            PaymentStatusArg::Failed => PaymentStatus::Failed,
        }
    }
}

/// Notifications subcommands
#[derive(Subcommand, Debug)]
pub enum NotificationCommands {
    /// List notifications
    List {
        /// Only unread ones
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification (or all of them) as read
    Read {
        /// Notification ID
        id: Option<u64>,
        /// Mark everything read
        #[arg(long)]
        all: bool,
    },
    /// Delete a notification
    Delete {
        /// Notification ID
        id: u64,
    },
}

/// Run a CLI command against the configured API.
pub async fn run(cli: &Cli, config: &Config) -> Result<()> {
    let store = TokenStore::new(&config.storage.data_dir);
    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());
    let client = Arc::new(ApiClient::new(base_url, store)?);

    let mut session = SessionStore::new(client.clone() as Arc<dyn Gateway>);
    session.restore().await;

    match &cli.command {
        Commands::Login { email, password } => cmd_login(&mut session, email, password).await,
        Commands::Register {
            name,
            email,
            password,
            role,
        } => cmd_register(&mut session, name, email, password, role.as_deref()).await,
        Commands::Logout => cmd_logout(&mut session).await,
        Commands::Whoami => cmd_whoami(&session),
        Commands::Requests(cmd) => cmd_requests(&client, &session, cmd).await,
        Commands::Products(cmd) => cmd_products(&client, &session, cmd).await,
        Commands::Cart(cmd) => cmd_cart(&client, &session, cmd).await,
        Commands::Orders(cmd) => cmd_orders(&client, &session, cmd).await,
        Commands::Notifications(cmd) => cmd_notifications(&client, &session, cmd).await,
        Commands::Dashboard => cmd_dashboard(&client, &session).await,
    }
}

/// Evaluate the route guard for a protected command.
fn ensure_access(session: &SessionStore, allowed: Option<&[Role]>) -> Result<()> {
    match guard::evaluate(session, allowed) {
        RouteDecision::Allow => Ok(()),
        RouteDecision::Wait => bail!("Session is still loading, try again"),
        RouteDecision::RedirectToLogin => {
            bail!("Not logged in ({}). Run `shopctl login` first.", guard::LOGIN_PATH)
        }
        RouteDecision::Redirect(path) => {
            bail!("Your role does not have access to this console; yours is at {}", path)
        }
    }
}

async fn cmd_login(session: &mut SessionStore, email: &str, password: &str) -> Result<()> {
    match session.login(email, password).await {
        Ok(user) => {
            println!("Welcome back, {}!", user.name);
            let role = session.role().unwrap_or(Role::Customer);
            println!("Role: {}  Console: {}", role, role.dashboard_path());
            Ok(())
        }
        Err(e) => bail!(
            "Login failed: {}",
            e.user_message("Please check your credentials")
        ),
    }
}

async fn cmd_register(
    session: &mut SessionStore,
    name: &str,
    email: &str,
    password: &str,
    role: Option<&str>,
) -> Result<()> {
    match session.register(name, email, password, role).await {
        Ok(user) => {
            println!("Account created. Welcome, {}!", user.name);
            let role = session.role().unwrap_or(Role::Customer);
            println!("Role: {}  Console: {}", role, role.dashboard_path());
            Ok(())
        }
        Err(e) => bail!("Registration failed: {}", e.user_message("Please try again")),
    }
}

async fn cmd_logout(session: &mut SessionStore) -> Result<()> {
    session.logout().await;
    println!("Logged out. See you next time!");
    Ok(())
}

fn cmd_whoami(session: &SessionStore) -> Result<()> {
    match session.user() {
        Some(user) => {
            println!("{} <{}>", user.name, user.email);
            let role = session.role().unwrap_or(Role::Customer);
            println!("Role: {}  Console: {}", role, role.dashboard_path());
        }
        None => println!("Not logged in (guest)"),
    }
    Ok(())
}

async fn cmd_requests(
    client: &Arc<ApiClient>,
    session: &SessionStore,
    cmd: &RequestCommands,
) -> Result<()> {
    match cmd {
        RequestCommands::List { queue } => {
            ensure_access(session, Some(&[Role::Admin, Role::Warehouse]))?;
            let mut console = RequestOrderConsole::new(client.clone() as Arc<dyn Gateway>);
            console
                .refresh()
                .await
                .context("Failed to load request orders")?;

            let orders: Vec<&RequestOrder> = match queue {
                Some(q) => console.in_queue((*q).into()),
                None => console.orders().iter().collect(),
            };
            print_request_orders(&orders);
            Ok(())
        }
        RequestCommands::Show { id } => {
            ensure_access(session, Some(&[Role::Admin, Role::Warehouse]))?;
            let order = client
                .request_order(*id)
                .await
                .context("Failed to load request order")?;
            print_request_orders(&[&order]);
            Ok(())
        }
        RequestCommands::Create { product, quantity } => {
            ensure_access(session, Some(&[Role::Admin]))?;
            let order = client
                .create_request_order(*product, *quantity)
                .await
                .context("Failed to create request order")?;
            println!(
                "Created request order #{} ({} units of product {})",
                order.id, order.quantity, order.product_id
            );
            Ok(())
        }
        RequestCommands::Approve { id } => {
            ensure_access(session, Some(&[Role::Admin]))?;
            admin_decision(client, *id, Decision::Approve).await
        }
        RequestCommands::Reject { id } => {
            ensure_access(session, Some(&[Role::Admin]))?;
            admin_decision(client, *id, Decision::Reject).await
        }
        RequestCommands::Fulfill { id } => {
            ensure_access(session, Some(&[Role::Warehouse]))?;
            let mut console = RequestOrderConsole::new(client.clone() as Arc<dyn Gateway>);
            console
                .refresh()
                .await
                .context("Failed to load request orders")?;

            // Advisory stock check: block fulfilling, never declining.
            if let Some(order) = console.order(*id) {
                if !can_fulfill(order) {
                    bail!(
                        "Insufficient stock to fulfill request #{} ({} requested). \
                         Use `shopctl requests decline {}` if it cannot be fulfilled.",
                        id,
                        order.quantity,
                        id
                    );
                }
            }

            match console.warehouse_decision(*id, Decision::Approve).await {
                Ok(()) => {
                    println!("Request #{} fulfilled", id);
                    Ok(())
                }
                Err(e) => bail!("Could not fulfill request #{}: {}", id, e),
            }
        }
        RequestCommands::Decline { id } => {
            ensure_access(session, Some(&[Role::Warehouse]))?;
            let mut console = RequestOrderConsole::new(client.clone() as Arc<dyn Gateway>);
            console
                .refresh()
                .await
                .context("Failed to load request orders")?;

            match console.warehouse_decision(*id, Decision::Reject).await {
                Ok(()) => {
                    println!("Request #{} declined", id);
                    Ok(())
                }
                Err(e) => bail!("Could not decline request #{}: {}", id, e),
            }
        }
    }
}

async fn admin_decision(client: &Arc<ApiClient>, id: u64, decision: Decision) -> Result<()> {
    let mut console = RequestOrderConsole::new(client.clone() as Arc<dyn Gateway>);
    console
        .refresh()
        .await
        .context("Failed to load request orders")?;

    let verb = match decision {
        Decision::Approve => "approved",
        Decision::Reject => "rejected",
    };
    match console.admin_decision(id, decision).await {
        Ok(()) => {
            println!("Request #{} {}", id, verb);
            Ok(())
        }
        Err(e) => bail!("Could not record decision on request #{}: {}", id, e),
    }
}

async fn cmd_products(
    client: &Arc<ApiClient>,
    session: &SessionStore,
    cmd: &ProductCommands,
) -> Result<()> {
    match cmd {
        ProductCommands::List {
            category,
            min_price,
            max_price,
        } => {
            ensure_access(session, None)?;
            let filter = ProductFilter {
                category: category.clone(),
                min_price: *min_price,
                max_price: *max_price,
            };
            let products = client
                .products(&filter)
                .await
                .context("Failed to load products")?;
            print_products(&products);
            Ok(())
        }
        ProductCommands::Show { id } => {
            ensure_access(session, None)?;
            let product = client
                .product(*id)
                .await
                .context("Failed to load product")?;
            print_products(std::slice::from_ref(&product));
            if !product.description.is_empty() {
                println!("{}", product.description);
            }
            Ok(())
        }
        ProductCommands::Create {
            name,
            price,
            quantity,
            description,
            low_stock_threshold,
            image,
            category,
        } => {
            ensure_access(session, Some(&[Role::Admin]))?;
            let payload = ProductPayload {
                name: Some(name.clone()),
                description: description.clone(),
                price: Some(*price),
                quantity: Some(*quantity),
                low_stock_threshold: *low_stock_threshold,
                image: image.clone(),
                category_id: *category,
            };
            let product = client
                .create_product(&payload)
                .await
                .context("Failed to create product")?;
            println!(
                "Created product #{} \"{}\" ({} in stock)",
                product.id, product.name, product.quantity
            );
            Ok(())
        }
        ProductCommands::Update {
            id,
            name,
            price,
            quantity,
            description,
            low_stock_threshold,
            image,
            category,
        } => {
            ensure_access(session, Some(&[Role::Admin]))?;
            let payload = ProductPayload {
                name: name.clone(),
                description: description.clone(),
                price: *price,
                quantity: *quantity,
                low_stock_threshold: *low_stock_threshold,
                image: image.clone(),
                category_id: *category,
            };
            let product = client
                .update_product(*id, &payload)
                .await
                .context("Failed to update product")?;
            println!(
                "Updated product #{} \"{}\" (price {:.2}, {} in stock)",
                product.id, product.name, product.price, product.quantity
            );
            Ok(())
        }
        ProductCommands::Delete { id } => {
            ensure_access(session, Some(&[Role::Admin]))?;
            client
                .delete_product(*id)
                .await
                .context("Failed to delete product")?;
            println!("Deleted product #{}", id);
            Ok(())
        }
        ProductCommands::LowStock => {
            ensure_access(session, Some(&[Role::Admin, Role::Warehouse]))?;
            let products = client
                .low_stock_products()
                .await
                .context("Failed to load low-stock products")?;
            print_products(&products);
            Ok(())
        }
    }
}

async fn cmd_cart(
    client: &Arc<ApiClient>,
    session: &SessionStore,
    cmd: &CartCommands,
) -> Result<()> {
    ensure_access(session, Some(&[Role::Customer]))?;
    match cmd {
        CartCommands::Show => {
            let cart = client.cart().await.context("Failed to load cart")?;
            print_cart(&cart);
            Ok(())
        }
        CartCommands::Add { product, quantity } => {
            client
                .add_to_cart(*product, *quantity)
                .await
                .context("Failed to add to cart")?;
            println!("Added {} x product #{} to the cart", quantity, product);
            Ok(())
        }
        CartCommands::Update { id, quantity } => {
            client
                .update_cart_item(*id, *quantity)
                .await
                .context("Failed to update cart item")?;
            println!("Cart item #{} is now {} units", id, quantity);
            Ok(())
        }
        CartCommands::Remove { id } => {
            client
                .remove_cart_item(*id)
                .await
                .context("Failed to remove cart item")?;
            println!("Removed cart item #{}", id);
            Ok(())
        }
        CartCommands::Clear => {
            client.clear_cart().await.context("Failed to clear cart")?;
            println!("Cart emptied");
            Ok(())
        }
    }
}

async fn cmd_orders(
    client: &Arc<ApiClient>,
    session: &SessionStore,
    cmd: &OrderCommands,
) -> Result<()> {
    match cmd {
        OrderCommands::List => {
            ensure_access(session, Some(&[Role::Staff, Role::Admin, Role::Customer]))?;
            let orders = client.orders().await.context("Failed to load orders")?;
            print_orders(&orders);
            Ok(())
        }
        OrderCommands::Show { id } => {
            ensure_access(session, Some(&[Role::Staff, Role::Admin, Role::Customer]))?;
            let order = client.order(*id).await.context("Failed to load order")?;
            print_order_detail(&order);
            Ok(())
        }
        OrderCommands::Create {
            payment_method,
            shipping_address,
        } => {
            ensure_access(session, Some(&[Role::Customer]))?;
            match client.create_order(payment_method, shipping_address).await {
                Ok(order) => {
                    println!("Order #{} placed (total {:.2})", order.id, order.total_amount);
                    Ok(())
                }
                Err(e) => bail!("Could not place order: {}", e.user_message("Please try again")),
            }
        }
        OrderCommands::PaymentMethods => {
            ensure_access(session, Some(&[Role::Customer]))?;
            let methods = client
                .payment_methods()
                .await
                .context("Failed to load payment methods")?;
            if methods.is_empty() {
                println!("No payment methods available");
            }
            for method in methods {
                println!("{}", method);
            }
            Ok(())
        }
        OrderCommands::SetStatus { id, status } => {
            ensure_access(session, Some(&[Role::Staff, Role::Admin]))?;
            let order = client
                .update_order_status(*id, (*status).into())
                .await
                .context("Failed to update order status")?;
            println!("Order #{} is now {}", order.id, order.status);
            Ok(())
        }
        OrderCommands::SetPayment { id, status } => {
            ensure_access(session, Some(&[Role::Staff, Role::Admin]))?;
            let order = client
                .update_order_payment(*id, (*status).into())
                .await
                .context("Failed to update payment status")?;
            println!("Order #{} payment is now {}", order.id, order.payment_status);
            Ok(())
        }
    }
}

async fn cmd_notifications(
    client: &Arc<ApiClient>,
    session: &SessionStore,
    cmd: &NotificationCommands,
) -> Result<()> {
    ensure_access(session, None)?;
    match cmd {
        NotificationCommands::List { unread } => {
            let notifications = if *unread {
                client.unread_notifications().await
            } else {
                client.notifications().await
            }
            .context("Failed to load notifications")?;
            print_notifications(&notifications);
            Ok(())
        }
        NotificationCommands::Read { id, all } => {
            if *all {
                client
                    .mark_all_notifications_read()
                    .await
                    .context("Failed to mark notifications read")?;
                println!("All notifications marked as read");
            } else if let Some(id) = id {
                client
                    .mark_notification_read(*id)
                    .await
                    .context("Failed to mark notification read")?;
                println!("Notification #{} marked as read", id);
            } else {
                bail!("Pass a notification ID or --all");
            }
            Ok(())
        }
        NotificationCommands::Delete { id } => {
            client
                .delete_notification(*id)
                .await
                .context("Failed to delete notification")?;
            println!("Notification #{} deleted", id);
            Ok(())
        }
    }
}

async fn cmd_dashboard(client: &Arc<ApiClient>, session: &SessionStore) -> Result<()> {
    ensure_access(session, None)?;
    let role = session.role().unwrap_or(Role::Customer);

    println!("{} dashboard", role);
    println!("{}", "-".repeat(40));

    if role == Role::Warehouse {
        // The warehouse console shows stats and its work queue side by side.
        let (stats, orders) =
            tokio::try_join!(client.dashboard(role.as_str()), client.request_orders())
                .context("Failed to load dashboard")?;
        print_stats(&stats);

        let ready: Vec<&RequestOrder> = orders
            .iter()
            .filter(|o| Queue::of(o) == Queue::ReadyForWarehouse)
            .collect();
        println!();
        println!("Ready for processing: {}", ready.len());
        print_request_orders(&ready);
    } else {
        let stats = client
            .dashboard(role.as_str())
            .await
            .context("Failed to load dashboard")?;
        print_stats(&stats);
    }
    Ok(())
}

// Output formatting

fn print_stats(stats: &DashboardStats) {
    if let Some(income) = stats.total_income {
        println!("Total income:    {:.2}", income);
    }
    if let Some(count) = stats.total_orders {
        println!("Total orders:    {}", count);
    }
    if let Some(count) = stats.todays_orders {
        println!("Today's orders:  {}", count);
    }
    if let Some(count) = stats.pending_orders {
        println!("Pending orders:  {}", count);
    }
    if let Some(count) = stats.low_stock_count {
        println!("Low on stock:    {}", count);
    }
}

fn print_request_orders(orders: &[&RequestOrder]) {
    if orders.is_empty() {
        println!("No request orders");
        return;
    }
    println!(
        "{:<6} {:<24} {:>6} {:>6} {:<10} {:<10}",
        "ID", "PRODUCT", "QTY", "STOCK", "ADMIN", "WAREHOUSE"
    );
    for order in orders {
        let (name, stock) = order
            .product
            .as_ref()
            .map(|p| (p.name.as_str(), p.quantity.to_string()))
            .unwrap_or(("?", "?".to_string()));
        println!(
            "{:<6} {:<24} {:>6} {:>6} {:<10} {:<10}",
            order.id, name, order.quantity, stock, order.admin_approval, order.warehouse_approval
        );
    }
}

fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products");
        return;
    }
    println!("{:<6} {:<32} {:>10} {:>6}", "ID", "NAME", "PRICE", "STOCK");
    for product in products {
        println!(
            "{:<6} {:<32} {:>10.2} {:>6}",
            product.id, product.name, product.price, product.quantity
        );
    }
}

fn print_cart(cart: &CartResponse) {
    if cart.items.is_empty() {
        println!("Cart is empty");
        return;
    }
    println!(
        "{:<6} {:<32} {:>6} {:>10} {:>10}",
        "ID", "PRODUCT", "QTY", "PRICE", "TOTAL"
    );
    let mut total = 0.0;
    for item in &cart.items {
        let line_total = item.product.price * item.quantity as f64;
        total += line_total;
        println!(
            "{:<6} {:<32} {:>6} {:>10.2} {:>10.2}",
            item.id, item.product.name, item.quantity, item.product.price, line_total
        );
    }
    println!("Total: {:.2}", total);
}

fn print_order_detail(order: &Order) {
    println!(
        "Order #{}  status: {}  payment: {} ({})",
        order.id, order.status, order.payment_status, order.payment_method
    );
    println!("Ship to: {}", order.shipping_address);
    for item in &order.items {
        println!(
            "  {} x{} @ {:.2}",
            item.product.name, item.quantity, item.price
        );
    }
    println!("Total: {:.2}", order.total_amount);
}

fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders");
        return;
    }
    println!(
        "{:<6} {:>10} {:<10} {:<8} {:<32}",
        "ID", "TOTAL", "STATUS", "PAYMENT", "SHIPPING"
    );
    for order in orders {
        println!(
            "{:<6} {:>10.2} {:<10} {:<8} {:<32}",
            order.id,
            order.total_amount,
            order.status,
            order.payment_method,
            order.shipping_address
        );
    }
}

fn print_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        println!("No notifications");
        return;
    }
    for n in notifications {
        let marker = if n.is_read { " " } else { "*" };
        println!("{} #{:<5} {} - {}", marker, n.id, n.title, n.message);
    }
}
