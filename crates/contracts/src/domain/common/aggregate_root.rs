/// Трейт для корня агрегата
///
/// В браузерной версии у агрегата нет метаданных жизненного цикла и событий:
/// всё состояние лежит в localStorage под ключом `collection_name()`.
pub trait AggregateRoot {
    /// Ключ коллекции в хранилище
    fn collection_name() -> &'static str;
}
