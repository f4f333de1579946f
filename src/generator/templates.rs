//! Template catalogs
//!
//! Every template carries its slot list explicitly: the n-th `{}` in `text`
//! is filled by the n-th [`Slot`]. Access templates describe only the request
//! line; the combined-log frame around it is added by the synthesizer.

use crate::core::Category;

/// Named value generator for one placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Percent,
    Megabytes,
    Gigabytes,
    Mbps,
    LoadAverage,
    Count,
    Days,
    Hours,
    Minutes,
    Seconds,
    Millis,
    Celsius,
    Rpm,
    Port,
    Version,
    Amount,
    Ip,
    Status,
    Bytes,
    Referrer,
    UserAgent,
    RequestPath,
    User,
    Email,
    Host,
    Service,
    /// Prefix followed by a random number, e.g. `txn_48213`
    Id(&'static str),
    /// Uniform pick from a fixed vocabulary
    Word(&'static [&'static str]),
    /// Uniform integer in an inclusive range
    Range(u32, u32),
}

#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub text: &'static str,
    pub slots: &'static [Slot],
}

const fn t(text: &'static str, slots: &'static [Slot]) -> Template {
    Template { text, slots }
}

pub fn catalog(category: Category) -> &'static [Template] {
    match category {
        Category::System => &SYSTEM,
        Category::Error => &ERROR,
        Category::Application => &APPLICATION,
        Category::Access => &ACCESS,
    }
}

use Slot::*;

// ============================================================================
// Vocabularies
// ============================================================================

const MOUNTS: &[&str] = &["/", "/var", "/home", "/data", "/mnt/backup", "/opt"];
const VOLUMES: &[&str] = &["sda1", "sdb1", "nvme0n1p2", "vol-archive", "vol-data"];
const CERTS: &[&str] = &["api.example.com", "*.internal", "mail.example.com", "cdn.example.com"];
const CRON_JOBS: &[&str] = &["logrotate", "db-vacuum", "cleanup-tmp", "report-daily", "sync-users"];
const JOB_STATUS: &[&str] = &["0", "success", "partial", "skipped"];
const TIMEZONES: &[&str] = &["UTC", "Europe/Madrid", "America/New_York", "Asia/Tokyo"];
const SENSORS: &[&str] = &["CPU", "GPU", "chassis", "PSU", "NVMe"];
const INTERFACES: &[&str] = &["eth0", "eth1", "ens3", "wlan0", "bond0"];
const LINK_STATES: &[&str] = &["up", "down", "degraded"];
const POWER_SOURCES: &[&str] = &["battery", "mains", "UPS"];

const ERROR_CODES: &[&str] = &["E_1001", "E_1002", "E_2001", "E_3001", "E_4001"];
const ERROR_TYPES: &[&str] = &[
    "ValidationError",
    "TimeoutError",
    "ConnectionError",
    "SecurityError",
];
const TABLES: &[&str] = &["users", "orders", "payments", "sessions", "inventory", "audit_log"];
const TABLE_PAIRS: &[&str] = &["orders, payments", "users, sessions", "inventory, orders"];
const SQL_ERRORS: &[&str] = &[
    "syntax error near 'WHERE'",
    "division by zero",
    "column does not exist",
    "lock wait timeout exceeded",
];
const PROCEDURES: &[&str] = &["sp_update_stock", "sp_close_order", "sp_merge_accounts"];
const BACKUP_FAILURES: &[&str] = &["disk full", "snapshot timeout", "permission denied"];
const INDEXES: &[&str] = &["idx_users_email", "idx_orders_created", "pk_payments"];
const ROLLBACK_REASONS: &[&str] = &["constraint violation", "client disconnect", "deadlock victim"];
const JWT_ERRORS: &[&str] = &["signature mismatch", "expired", "malformed header"];
const PROTECTED: &[&str] = &["/admin/settings", "/billing/export", "/internal/metrics"];
const SESSION_ERRORS: &[&str] = &["session expired", "fingerprint mismatch", "unknown session id"];
const API_KEY_ERRORS: &[&str] = &["key revoked", "key not found", "scope insufficient"];
const MODULES: &[&str] = &["OrderProcessor", "CartService", "UserRepository", "ReportBuilder"];
const STACK_CAUSES: &[&str] = &["recursive call depth exceeded", "unbounded recursion in parser"];
const FS_ERRORS: &[&str] = &["EACCES", "ENOENT", "ENOSPC", "EIO"];
const FILE_PATHS: &[&str] = &["/var/data/export.csv", "/tmp/upload.part", "/etc/app/secrets.yml"];
const REGIONS: &[&str] = &["sessions", "catalog", "pricing", "feature-flags"];
const CONFIG_FILES: &[&str] = &["app.yaml", "database.toml", "routes.json", ".env"];
const TEMPLATE_FILES: &[&str] = &["invoice.html", "welcome_email.html", "dashboard.tpl"];
const OBJECT_TYPES: &[&str] = &["OrderDTO", "UserProfile", "CartSnapshot", "AuditEvent"];
const WS_REASONS: &[&str] = &["ping timeout", "abnormal closure (1006)", "policy violation (1008)"];
const GRPC_CODES: &[&str] = &["UNAVAILABLE", "DEADLINE_EXCEEDED", "RESOURCE_EXHAUSTED"];
const MQTT_REASONS: &[&str] = &["keepalive timeout", "broker restart", "not authorized"];

const CLIENTS: &[&str] = &["Chrome on Windows", "Safari on iOS", "Firefox on Linux", "mobile app"];
const PROFILE_FIELDS: &[&str] = &["email", "avatar", "display_name, bio", "phone"];
const TWO_FA_METHODS: &[&str] = &["TOTP", "SMS", "security key"];
const DEACTIVATION_REASONS: &[&str] = &["user request", "payment overdue", "policy violation"];
const PREFERENCES: &[&str] = &["language", "theme", "notifications", "timezone"];
const GROUPS: &[&str] = &["beta-testers", "admins", "premium", "support"];
const PAYMENT_METHODS: &[&str] = &["credit_card", "paypal", "bank_transfer", "apple_pay"];
const PLANS: &[&str] = &["basic", "pro", "enterprise", "team"];
const DISCOUNT_CODES: &[&str] = &["WELCOME10", "SPRING25", "FREESHIP", "LOYAL15"];
const BILLING_CYCLES: &[&str] = &["monthly", "quarterly", "yearly"];
const PAYMENT_FAILURES: &[&str] = &["card declined", "insufficient funds", "gateway timeout"];
const DOCUMENTS: &[&str] = &["report_q3.pdf", "contract.docx", "invoice_2291.pdf", "notes.txt"];
const CONTENT_CATEGORIES: &[&str] = &["news", "tutorials", "announcements", "reviews"];
const MEDIA_FILES: &[&str] = &["video_1080p.mp4", "banner.png", "podcast_ep12.mp3"];
const MEDIA_RESULTS: &[&str] = &["transcoded", "thumbnail generated", "compressed"];
const MODERATION_LABELS: &[&str] = &["spam", "offensive", "duplicate", "safe"];
const SCHEDULE_SLOTS: &[&str] = &["tomorrow 09:00", "Monday 08:30", "next week"];
const NEWSLETTERS: &[&str] = &["weekly-digest", "product-updates", "security-bulletin"];
const ARCHIVE_REASONS: &[&str] = &["expired", "superseded", "manual"];
const PAGES: &[&str] = &["/products", "/blog/launch", "/pricing", "/about"];
const ENVIRONMENTS: &[&str] = &["production", "staging", "development"];
const FEATURE_FLAGS: &[&str] = &["new_checkout", "dark_mode", "ai_search", "fast_sync"];
const AUDIENCES: &[&str] = &["10% of users", "beta-testers", "internal staff", "all users"];
const CONFIG_KEYS: &[&str] = &["max_connections", "cache_ttl", "log_level", "rate_limit"];
const HEALTH_STATES: &[&str] = &["healthy", "degraded", "recovering"];
const METRICS: &[&str] = &["queue_depth", "active_sessions", "p99_latency_ms", "cache_size"];

const ANALYTICS: &[&str] = &["traffic", "conversions", "retention", "revenue"];
const ASSETS: &[&str] = &["main", "vendor", "app.min", "theme"];
const IMAGES: &[&str] = &["logo", "hero", "avatar", "banner"];
const IMAGE_EXTS: &[&str] = &["png", "jpg", "webp", "svg"];
const FONTS: &[&str] = &["inter-regular", "roboto-bold", "fira-code"];
const WEBHOOK_SOURCES: &[&str] = &["stripe", "github", "slack"];

// ============================================================================
// Catalogs
// ============================================================================

pub static SYSTEM: [Template; 30] = [
    t("CPU usage: {}% across {} cores", &[Percent, Range(2, 64)]),
    t("Memory usage: {}MB / {}MB ({}% used)", &[Megabytes, Megabytes, Percent]),
    t("Disk space: {}GB free of {}GB total on {}", &[Gigabytes, Gigabytes, Word(MOUNTS)]),
    t("Network bandwidth: {}Mbps ({}% utilization)", &[Mbps, Percent]),
    t("Load average: {}, {}, {} (1/5/15 min)", &[LoadAverage, LoadAverage, LoadAverage]),
    t("Swap usage: {}MB ({}% used)", &[Megabytes, Percent]),
    t("System uptime: {} days, {} hours", &[Days, Hours]),
    t("Process count: {} running, {} sleeping", &[Count, Count]),
    t("Network connections: {} established, {} waiting", &[Count, Count]),
    t("IO operations: {} read/s, {} write/s", &[Count, Count]),
    t("System backup {} completed in {} minutes", &[Id("backup-"), Minutes]),
    t("Scheduled maintenance starting in {} minutes", &[Minutes]),
    t("Service {} restarted successfully", &[Service]),
    t("System update available: version {}", &[Version]),
    t("Firewall rule {} updated for port {}", &[Id("fw-"), Port]),
    t("DNS cache cleared: {} entries removed", &[Count]),
    t("Certificate {} renewed, expires in {} days", &[Word(CERTS), Days]),
    t("Cron job {} completed with status {}", &[Word(CRON_JOBS), Word(JOB_STATUS)]),
    t("System timezone updated to {}", &[Word(TIMEZONES)]),
    t("Hardware sensor: {} temperature at {}°C", &[Word(SENSORS), Celsius]),
    t("Cache hit ratio: {}% ({} hits/{} requests)", &[Percent, Count, Count]),
    t("Database connections: {} active, {} idle", &[Count, Count]),
    t("Thread pool: {} active, {} queued", &[Count, Count]),
    t("Storage volume {} mounted at {}", &[Word(VOLUMES), Word(MOUNTS)]),
    t("Memory cleaned: {}MB recovered", &[Megabytes]),
    t("Network interface {} status changed to {}", &[Word(INTERFACES), Word(LINK_STATES)]),
    t("Power supply {} switched to {}", &[Range(1, 4), Word(POWER_SOURCES)]),
    t("Fan speed adjusted: {} RPM", &[Rpm]),
    t("Temperature threshold adjusted: {}°C", &[Celsius]),
    t("Virtual memory committed: {}GB", &[Gigabytes]),
];

pub static ERROR: [Template; 40] = [
    // Database
    t("Database connection timeout after {}ms on host {}", &[Millis, Host]),
    t("Deadlock detected in transaction {}: tables involved {}", &[Id("txn_"), Word(TABLE_PAIRS)]),
    t("Query execution failed: {} in procedure {}", &[Word(SQL_ERRORS), Word(PROCEDURES)]),
    t("Database replication lag: {} seconds behind master", &[Seconds]),
    t("Connection pool exhausted: {} waiting threads", &[Count]),
    t("Foreign key constraint violation on table {}", &[Word(TABLES)]),
    t("Database backup failed: {} - {}", &[Word(ERROR_CODES), Word(BACKUP_FAILURES)]),
    t("Invalid SQL syntax in query {}: {}", &[Id("q_"), Word(SQL_ERRORS)]),
    t("Database index corruption detected on {}", &[Word(INDEXES)]),
    t("Transaction rollback triggered: {}", &[Word(ROLLBACK_REASONS)]),
    // Authentication / authorization
    t("Failed login attempt for user {} from IP {}", &[User, Ip]),
    t("Invalid JWT token: {} for user {}", &[Word(JWT_ERRORS), User]),
    t("Permission denied: {} accessing {}", &[User, Word(PROTECTED)]),
    t("Session validation failed: {}", &[Word(SESSION_ERRORS)]),
    t("OAuth token expired for service {}", &[Service]),
    t("Rate limit exceeded: {} requests from {}", &[Count, Ip]),
    t("Invalid 2FA code attempted for user {}", &[User]),
    t("Password reset failed for account {}", &[Id("acct_")]),
    t("API key validation failed: {}", &[Word(API_KEY_ERRORS)]),
    t("CORS policy violation from origin {}", &[Referrer]),
    // Application
    t("NullPointerException in module {} line {}", &[Word(MODULES), Range(1, 2000)]),
    t("Memory leak detected in service {}: {}MB/hour", &[Service, Range(1, 512)]),
    t("Stack overflow in thread {}: {}", &[Id("Thread-"), Word(STACK_CAUSES)]),
    t("Uncaught exception in {}: {}", &[Word(MODULES), Word(ERROR_TYPES)]),
    t("File system error: {} when accessing {}", &[Word(FS_ERRORS), Word(FILE_PATHS)]),
    t("Cache corruption detected in region {}", &[Word(REGIONS)]),
    t("Configuration parse error in {}", &[Word(CONFIG_FILES)]),
    t("Template rendering failed: {}", &[Word(TEMPLATE_FILES)]),
    t("Serialization error for object {}", &[Word(OBJECT_TYPES)]),
    t("Race condition detected in {}", &[Word(MODULES)]),
    // Network
    t("Connection refused to service {} on port {}", &[Service, Port]),
    t("DNS resolution failed for {}", &[Host]),
    t("SSL/TLS handshake failed with {}", &[Host]),
    t("Network timeout reaching {}:{}", &[Host, Port]),
    t("Invalid response from API {}: {}", &[Service, Status]),
    t("Load balancer health check failed for {}", &[Host]),
    t("WebSocket connection terminated: {}", &[Word(WS_REASONS)]),
    t("HTTP/3 negotiation failed with {}", &[Host]),
    t("gRPC stream error: {}", &[Word(GRPC_CODES)]),
    t("MQTT broker connection lost: {}", &[Word(MQTT_REASONS)]),
];

pub static APPLICATION: [Template; 40] = [
    // User activity
    t("User {} logged in from {} using {}", &[User, Ip, Word(CLIENTS)]),
    t("Profile updated for user {}: fields {}", &[User, Word(PROFILE_FIELDS)]),
    t("New account registered: {} (referrer: {})", &[Email, Referrer]),
    t("Password changed for user {} from IP {}", &[User, Ip]),
    t("User {} enabled 2FA using {}", &[User, Word(TWO_FA_METHODS)]),
    t("Account {} deactivated: reason {}", &[Id("acct_"), Word(DEACTIVATION_REASONS)]),
    t("User preferences updated: {} for {}", &[Word(PREFERENCES), User]),
    t("Session extended for user {}: {} minutes", &[User, Minutes]),
    t("Login streak: {} days for user {}", &[Days, User]),
    t("User {} joined group {}", &[User, Word(GROUPS)]),
    // Transactions
    t("Order #{} placed: {} items, total ${}", &[Range(10000, 99999), Range(1, 20), Amount]),
    t("Payment processed: ${} via {} for order {}", &[Amount, Word(PAYMENT_METHODS), Id("ORD-")]),
    t("Subscription renewed: plan {} for user {}", &[Word(PLANS), User]),
    t("Refund issued: ${} for order {}", &[Amount, Id("ORD-")]),
    t("Invoice #{} generated for account {}", &[Range(100000, 999999), Id("acct_")]),
    t("Cart abandoned: {} items for user {}", &[Range(1, 20), User]),
    t("Discount code {} applied: saved ${}", &[Word(DISCOUNT_CODES), Amount]),
    t("Recurring payment scheduled: {} for {}", &[Word(BILLING_CYCLES), User]),
    t("Payment failed: {} - Order #{}", &[Word(PAYMENT_FAILURES), Range(10000, 99999)]),
    t("Wallet {} credited with {} points", &[Id("wallet_"), Count]),
    // Content
    t("Document {} uploaded by user {}", &[Word(DOCUMENTS), User]),
    t("Post #{} published in category {}", &[Range(1, 99999), Word(CONTENT_CATEGORIES)]),
    t("Comment added to {} by user {}", &[Id("post_"), User]),
    t("Media file {} processed: {}", &[Word(MEDIA_FILES), Word(MEDIA_RESULTS)]),
    t("Content moderation: {} flagged as {}", &[Id("post_"), Word(MODERATION_LABELS)]),
    t("Article {} scheduled for {}", &[Id("article_"), Word(SCHEDULE_SLOTS)]),
    t("Newsletter {} sent to {} subscribers", &[Word(NEWSLETTERS), Range(100, 50000)]),
    t("Template {} updated by {}", &[Word(TEMPLATE_FILES), User]),
    t("Asset {} archived: reason {}", &[Id("asset_"), Word(ARCHIVE_REASONS)]),
    t("SEO metadata updated for {}", &[Word(PAGES)]),
    // Operations
    t("Cache invalidated for key {} by {}", &[Id("cache_key_"), Service]),
    t("Background job {} completed in {}ms", &[Id("job_"), Millis]),
    t("API version {} deployed to {}", &[Version, Word(ENVIRONMENTS)]),
    t("Feature flag {} enabled for {}", &[Word(FEATURE_FLAGS), Word(AUDIENCES)]),
    t("Data export completed: {} records for {}", &[Count, Id("export_")]),
    t("Webhook {} delivered to {} successfully", &[Id("wh_"), Referrer]),
    t("Batch process {} started with {} items", &[Id("batch_"), Count]),
    t("Config {} updated in environment {}", &[Word(CONFIG_KEYS), Word(ENVIRONMENTS)]),
    t("Service {} health check: {}", &[Service, Word(HEALTH_STATES)]),
    t("Metric {} reported value {}", &[Word(METRICS), Range(0, 10000)]),
];

/// Request lines only (`METHOD PATH`)
pub static ACCESS: [Template; 24] = [
    t("GET {}", &[RequestPath]),
    t("POST {}", &[RequestPath]),
    t("PUT {}", &[RequestPath]),
    t("DELETE {}", &[RequestPath]),
    t("PATCH {}", &[RequestPath]),
    t("OPTIONS {}", &[RequestPath]),
    t("HEAD {}", &[RequestPath]),
    t("GET /api/v{}/users/{}", &[Range(1, 3), Range(1, 10000)]),
    t("POST /api/v{}/auth/login", &[Range(1, 3)]),
    t("GET /api/v{}/products?page={}", &[Range(1, 3), Range(1, 50)]),
    t("PUT /api/v{}/users/{}/profile", &[Range(1, 3), Range(1, 10000)]),
    t("DELETE /api/v{}/sessions/{}", &[Range(1, 3), Id("sess_")]),
    t("POST /api/v{}/orders", &[Range(1, 3)]),
    t("GET /api/v{}/analytics/{}", &[Range(1, 3), Word(ANALYTICS)]),
    t("GET /static/css/{}.css", &[Word(ASSETS)]),
    t("GET /static/js/{}.js", &[Word(ASSETS)]),
    t("GET /static/img/{}.{}", &[Word(IMAGES), Word(IMAGE_EXTS)]),
    t("GET /assets/fonts/{}.woff2", &[Word(FONTS)]),
    t("GET /health", &[]),
    t("GET /metrics", &[]),
    t("POST /webhooks/{}", &[Word(WEBHOOK_SOURCES)]),
    t("GET /sitemap.xml", &[]),
    t("GET /robots.txt", &[]),
    t("GET /swagger/v{}/api-docs", &[Range(1, 3)]),
];
