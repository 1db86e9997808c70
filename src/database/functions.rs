use crate::types::Scope;

/// SQL types a stored-function argument can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Integer,
    Numeric,
    Text,
    Boolean,
    Date,
    Timestamptz,
    Jsonb,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Integer => "integer",
            SqlType::Numeric => "numeric",
            SqlType::Text => "text",
            SqlType::Boolean => "boolean",
            SqlType::Date => "date",
            SqlType::Timestamptz => "timestamptz",
            SqlType::Jsonb => "jsonb",
        }
    }
}

/// The closed set of stored functions the gateway is allowed to call.
///
/// Each variant carries the positional signature declared in the database;
/// the two must be kept in sync when the schema changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoredFunction {
    // auth
    UserRegister,
    UserLogin,
    UserLogout,
    // products
    GetAvailableProducts,
    GetProductByName,
    UserExportProducts,
    AdminExportProducts,
    AdminImportProducts,
    CreateProduct,
    UpdateProduct,
    AdminUpdateProduct,
    DeleteProduct,
    AdminDeleteProduct,
    // menu
    AddProductToMenu,
    RemoveProductFromMenu,
    GenerateWeeklyMenu,
    GetWeeklyMenu,
    GetDailyMenu,
    RegenerateDay,
    // consumption
    AddConsumedFood,
    RemoveConsumedFood,
    GetDailyConsumption,
    // profile
    GetMyProfile,
    UpdateMyProfile,
    GetWeightHistory,
    AddWeightRecord,
    // reports
    GetDailyReport,
    GetWeeklyReport,
    GetWeightReport,
    GetCalorieProgress,
    // administration
    AdminGetAllUsers,
    AdminExportUsers,
    AdminCreateUser,
    AdminCreateAdmin,
    AdminUpdateUser,
    AdminDeleteUser,
    AdminDeleteAdmin,
}

const PRODUCT_FIELDS: &[SqlType] = &[
    SqlType::Text,    // name
    SqlType::Numeric, // calories
    SqlType::Numeric, // portion_size
    SqlType::Text,    // portion_unit
    SqlType::Numeric, // protein
    SqlType::Numeric, // fat
    SqlType::Numeric, // carbs
    SqlType::Boolean, // is_public
];

const PRODUCT_UPDATE: &[SqlType] = &[
    SqlType::Integer,
    SqlType::Text,
    SqlType::Numeric,
    SqlType::Numeric,
    SqlType::Text,
    SqlType::Numeric,
    SqlType::Numeric,
    SqlType::Numeric,
    SqlType::Boolean,
];

const CREDENTIALS: &[SqlType] = &[SqlType::Text, SqlType::Text];
const ACCOUNT: &[SqlType] = &[SqlType::Text, SqlType::Text, SqlType::Integer, SqlType::Integer];
const ID: &[SqlType] = &[SqlType::Integer];
const DATE: &[SqlType] = &[SqlType::Date];
const NONE: &[SqlType] = &[];

impl StoredFunction {
    pub const ALL: &'static [StoredFunction] = &[
        StoredFunction::UserRegister,
        StoredFunction::UserLogin,
        StoredFunction::UserLogout,
        StoredFunction::GetAvailableProducts,
        StoredFunction::GetProductByName,
        StoredFunction::UserExportProducts,
        StoredFunction::AdminExportProducts,
        StoredFunction::AdminImportProducts,
        StoredFunction::CreateProduct,
        StoredFunction::UpdateProduct,
        StoredFunction::AdminUpdateProduct,
        StoredFunction::DeleteProduct,
        StoredFunction::AdminDeleteProduct,
        StoredFunction::AddProductToMenu,
        StoredFunction::RemoveProductFromMenu,
        StoredFunction::GenerateWeeklyMenu,
        StoredFunction::GetWeeklyMenu,
        StoredFunction::GetDailyMenu,
        StoredFunction::RegenerateDay,
        StoredFunction::AddConsumedFood,
        StoredFunction::RemoveConsumedFood,
        StoredFunction::GetDailyConsumption,
        StoredFunction::GetMyProfile,
        StoredFunction::UpdateMyProfile,
        StoredFunction::GetWeightHistory,
        StoredFunction::AddWeightRecord,
        StoredFunction::GetDailyReport,
        StoredFunction::GetWeeklyReport,
        StoredFunction::GetWeightReport,
        StoredFunction::GetCalorieProgress,
        StoredFunction::AdminGetAllUsers,
        StoredFunction::AdminExportUsers,
        StoredFunction::AdminCreateUser,
        StoredFunction::AdminCreateAdmin,
        StoredFunction::AdminUpdateUser,
        StoredFunction::AdminDeleteUser,
        StoredFunction::AdminDeleteAdmin,
    ];

    pub fn name(&self) -> &'static str {
        use StoredFunction::*;

        match self {
            UserRegister => "user_register",
            UserLogin => "user_login",
            UserLogout => "user_logout",
            GetAvailableProducts => "get_available_products",
            GetProductByName => "get_product_by_name",
            UserExportProducts => "user_export_products",
            AdminExportProducts => "admin_export_products",
            AdminImportProducts => "admin_import_products",
            CreateProduct => "create_product",
            UpdateProduct => "update_product",
            AdminUpdateProduct => "admin_update_product",
            DeleteProduct => "delete_product",
            AdminDeleteProduct => "admin_delete_product",
            AddProductToMenu => "add_product_to_menu",
            RemoveProductFromMenu => "remove_product_from_menu",
            GenerateWeeklyMenu => "generate_weekly_menu",
            GetWeeklyMenu => "get_weekly_menu",
            GetDailyMenu => "get_daily_menu",
            RegenerateDay => "regenerate_day",
            AddConsumedFood => "add_consumed_food",
            RemoveConsumedFood => "remove_consumed_food",
            GetDailyConsumption => "get_daily_consumption",
            GetMyProfile => "get_my_profile",
            UpdateMyProfile => "update_my_profile",
            GetWeightHistory => "get_weight_history",
            AddWeightRecord => "add_weight_record",
            GetDailyReport => "get_daily_report",
            GetWeeklyReport => "get_weekly_report",
            GetWeightReport => "get_weight_report",
            GetCalorieProgress => "get_calorie_progress",
            AdminGetAllUsers => "admin_get_all_users",
            AdminExportUsers => "admin_export_users",
            AdminCreateUser => "admin_create_user",
            AdminCreateAdmin => "admin_create_admin",
            AdminUpdateUser => "admin_update_user",
            AdminDeleteUser => "admin_delete_user",
            AdminDeleteAdmin => "admin_delete_admin",
        }
    }

    /// Declared argument types, in positional order
    pub fn signature(&self) -> &'static [SqlType] {
        use StoredFunction::*;

        match self {
            UserRegister | UserLogin => CREDENTIALS,
            UserLogout => NONE,
            GetAvailableProducts | UserExportProducts | AdminExportProducts => NONE,
            GetProductByName => &[SqlType::Text],
            AdminImportProducts => &[SqlType::Jsonb],
            CreateProduct => PRODUCT_FIELDS,
            UpdateProduct | AdminUpdateProduct => PRODUCT_UPDATE,
            DeleteProduct | AdminDeleteProduct => ID,
            AddProductToMenu | RemoveProductFromMenu => ID,
            GenerateWeeklyMenu | GetWeeklyMenu | GetDailyMenu | RegenerateDay => DATE,
            AddConsumedFood => &[SqlType::Integer, SqlType::Numeric, SqlType::Timestamptz],
            RemoveConsumedFood => ID,
            GetDailyConsumption => DATE,
            GetMyProfile | GetWeightHistory => NONE,
            UpdateMyProfile => &[SqlType::Integer, SqlType::Integer],
            AddWeightRecord => &[SqlType::Date, SqlType::Numeric],
            GetDailyReport | GetWeeklyReport | GetWeightReport | GetCalorieProgress => DATE,
            AdminGetAllUsers | AdminExportUsers => NONE,
            AdminCreateUser | AdminCreateAdmin => ACCOUNT,
            AdminUpdateUser => &[SqlType::Integer, SqlType::Integer, SqlType::Integer],
            AdminDeleteUser | AdminDeleteAdmin => ID,
        }
    }

    pub fn arity(&self) -> usize {
        self.signature().len()
    }
}

/// Product mutations that exist in an owner-scoped and an admin-scoped form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductMutation {
    Update,
    Delete,
}

impl ProductMutation {
    pub fn function(self, scope: Scope) -> StoredFunction {
        match (self, scope) {
            (ProductMutation::Update, Scope::Owner) => StoredFunction::UpdateProduct,
            (ProductMutation::Update, Scope::Admin) => StoredFunction::AdminUpdateProduct,
            (ProductMutation::Delete, Scope::Owner) => StoredFunction::DeleteProduct,
            (ProductMutation::Delete, Scope::Admin) => StoredFunction::AdminDeleteProduct,
        }
    }
}
