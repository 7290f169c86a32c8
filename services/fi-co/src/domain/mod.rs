//! 领域层
//!
//! 实体、值对象、枚举、本地化规则、批量调整模型、仓储接口和领域事件

pub mod entities;
pub mod enums;
pub mod events;
pub mod localization;
pub mod mass_update;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use enums::*;
pub use events::*;
pub use mass_update::*;
pub use repositories::*;
pub use value_objects::*;
