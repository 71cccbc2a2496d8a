// Fixed replies sent to the chat. The bot speaks Russian only.

pub const START_MESSAGE: &str = "Я помогу подготовить ответ на экзаменационный вопрос по дисциплине \"Операционные системы\".
Пришлите мне фотографию с вопросом или наберите его текстом.";

pub const NO_ANSWER_MESSAGE: &str = "Я не смог подготовить ответ на экзаменационный вопрос.";

pub const BAD_PHOTO_MESSAGE: &str = "Я не могу обработать эту фотографию.";

pub const UNKNOWN_REQUEST_MESSAGE: &str =
    "Я могу обработать только текстовое сообщение или фотографию.";
