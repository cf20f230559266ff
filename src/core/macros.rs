//! 核心宏定义

/// 为配置结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use game_engine_sfx::impl_default;
///
/// struct PoolSettings {
///     capacity: usize,
///     label: String,
/// }
///
/// impl_default!(PoolSettings {
///     capacity: 1024,
///     label: String::new(),
/// });
///
/// assert_eq!(PoolSettings::default().capacity, 1024);
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
